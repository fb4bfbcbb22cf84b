//! Painting region tap targets on top of the image

use egui::{Painter, Pos2, Rounding, Stroke};

use super::{LayoutRect, RegionStyle};

/// Draw every hit box, highlighting `selected`
///
/// `origin` is the screen position of the layout's top-left corner.
pub fn paint_regions(
    painter: &Painter,
    origin: Pos2,
    hit_boxes: impl IntoIterator<Item = LayoutRect>,
    selected: Option<usize>,
    style: &RegionStyle,
) {
    let rounding = Rounding::same(style.corner_radius);
    let stroke = Stroke::new(style.outline_width, style.outline_color());

    for (i, rect) in hit_boxes.into_iter().enumerate() {
        let screen_rect = rect.to_screen(origin);
        let is_selected = selected == Some(i);

        painter.rect_filled(screen_rect, rounding, style.fill(is_selected));
        painter.rect_stroke(screen_rect, rounding, stroke);
    }
}
