//! Region Overlay Layer
//!
//! Maps OCR frames from image pixels onto the rendered image and paints the
//! tap targets over it.

pub mod geometry;
pub mod regions;
pub mod widgets;

pub use geometry::{map_rect, ContainFit, GeometryError, ImageDimensions, ImageRect, LayoutDimensions, LayoutRect};
pub use regions::paint_regions;
pub use widgets::RegionStyle;
