//! Reusable UI components

pub mod exit_dialog;
pub mod sheet;
pub mod toolbar;

pub use exit_dialog::render_exit_dialog;
pub use sheet::render_bottom_sheet;
pub use toolbar::{dropped_image, render_toolbar};
