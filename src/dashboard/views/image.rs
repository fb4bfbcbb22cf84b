//! Picked image with region tap targets

use egui::{Color32, RichText, Sense};
use tracing::warn;

use crate::dashboard::theme::ThemeColors;
use crate::overlay::{paint_regions, LayoutDimensions, RegionStyle};
use crate::reader::{Effect, ReaderSession, ReaderStatus};

/// Draw the current image and its regions; taps select regions
pub fn render_image_view(
    ui: &mut egui::Ui,
    session: &mut ReaderSession,
    texture: Option<&egui::TextureHandle>,
    style: &RegionStyle,
) -> Vec<Effect> {
    if session.image_path().is_none() {
        ui.centered_and_justified(|ui| {
            ui.label(
                RichText::new("📷 No image selected")
                    .size(22.0)
                    .color(ThemeColors::TEXT_MUTED),
            );
        });
        return Vec::new();
    }

    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
    if let Ok(layout) = LayoutDimensions::new(rect.width(), rect.height()) {
        session.set_layout(layout);
    }

    let painter = ui.painter_at(rect);
    match (texture, session.rendered_area()) {
        (Some(texture), Some(area)) => {
            painter.image(
                texture.id(),
                area.to_screen(rect.min),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        _ => {
            if *session.status() == ReaderStatus::Loading {
                ui.put(
                    egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0)),
                    egui::Spinner::new().size(32.0),
                );
            }
        }
    }

    paint_regions(
        &painter,
        rect.min,
        session.hit_boxes(),
        session.controller().selected(),
        style,
    );

    let mut effects = Vec::new();
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let local = pos - rect.min;
            match session.tap_image(local.x, local.y) {
                Some(Ok(selected)) => effects = selected,
                Some(Err(e)) => warn!("Region tap rejected: {}", e),
                None => {}
            }
        }
    }
    effects
}
