//! Image-space to layout-space mapping
//!
//! Recognized regions come back from OCR in the pixel space of the source
//! image. The image is shown with "contain" scaling (uniform scale, no
//! cropping, centered letterboxing), so every frame has to be moved into the
//! coordinate space of the container before it can be drawn or hit-tested.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing dimensions
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Width or height was zero, negative or not a number
    #[error("dimensions must be positive, got {width} x {height}")]
    NonPositive { width: f32, height: f32 },
}

fn check_positive(width: f32, height: f32) -> Result<(), GeometryError> {
    // NaN fails both comparisons
    if width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { width, height })
    }
}

/// Natural pixel size of the source image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDimensions {
    width: f32,
    height: f32,
}

impl ImageDimensions {
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        check_positive(width, height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// The rectangle covering the whole image
    pub fn full_rect(&self) -> ImageRect {
        ImageRect {
            top: 0.0,
            left: 0.0,
            width: self.width,
            height: self.height,
        }
    }
}

/// Size of the container the image is rendered into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutDimensions {
    width: f32,
    height: f32,
}

impl LayoutDimensions {
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        check_positive(width, height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Rectangle in image pixel space, as produced by OCR
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl ImageRect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self { top, left, width, height }
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &ImageRect) -> ImageRect {
        let top = self.top.min(other.top);
        let left = self.left.min(other.left);
        let bottom = (self.top + self.height).max(other.top + other.height);
        let right = (self.left + self.width).max(other.left + other.width);
        ImageRect {
            top,
            left,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// Rectangle in layout space, relative to the container's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Grow the rectangle by `amount` on every side
    pub fn expand(&self, amount: f32) -> LayoutRect {
        LayoutRect {
            top: self.top - amount,
            left: self.left - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Whether the point (x, y) lies inside the rectangle (edges included)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Whether `other` lies completely inside this rectangle
    pub fn encloses(&self, other: &LayoutRect) -> bool {
        const EPS: f32 = 1e-3;
        other.left >= self.left - EPS
            && other.top >= self.top - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    /// Place the rectangle on screen given the container's origin
    pub fn to_screen(&self, origin: egui::Pos2) -> egui::Rect {
        egui::Rect::from_min_size(
            origin + egui::vec2(self.left, self.top),
            egui::vec2(self.width, self.height),
        )
    }
}

/// Uniform scale and letterbox offsets of one image inside one container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainFit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ContainFit {
    /// Compute the largest centered fit of `image` inside `layout`
    pub fn new(layout: LayoutDimensions, image: ImageDimensions) -> Self {
        let scale = (layout.width / image.width).min(layout.height / image.height);
        let offset_x = ((layout.width - image.width * scale) / 2.0).max(0.0);
        let offset_y = ((layout.height - image.height * scale) / 2.0).max(0.0);
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Map an image-space rectangle into layout space
    pub fn map_rect(&self, rect: &ImageRect) -> LayoutRect {
        LayoutRect {
            top: rect.top * self.scale + self.offset_y,
            left: rect.left * self.scale + self.offset_x,
            width: rect.width * self.scale,
            height: rect.height * self.scale,
        }
    }

    /// Area occupied by the rendered image inside the container
    pub fn rendered_area(&self, image: ImageDimensions) -> LayoutRect {
        self.map_rect(&image.full_rect())
    }
}

/// Map one rectangle from image space to layout space under contain fit
pub fn map_rect(layout: LayoutDimensions, image: ImageDimensions, rect: &ImageRect) -> LayoutRect {
    ContainFit::new(layout, image).map_rect(rect)
}
