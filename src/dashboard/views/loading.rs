//! Shown while the lexicon warms up

use egui::RichText;

use crate::dashboard::theme::ThemeColors;

pub fn render_loading_view(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 2.0 - 40.0);
            ui.spinner();
            ui.add_space(12.0);
            ui.label(
                RichText::new("Loading dictionaries…")
                    .size(18.0)
                    .color(ThemeColors::TEXT_PRIMARY),
            );
        });
    });
}
