//! Reader window views

pub mod image;
pub mod loading;
pub mod reading;

pub use image::render_image_view;
pub use loading::render_loading_view;
pub use reading::render_reading_view;
