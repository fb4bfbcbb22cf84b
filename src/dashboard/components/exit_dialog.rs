//! Exit confirmation dialog

use egui::{Align2, RichText};

use crate::dashboard::theme::ThemeColors;

/// Show the "Exit the app?" dialog
///
/// Returns `Some(true)` for YES, `Some(false)` for Cancel, `None` while open.
pub fn render_exit_dialog(ctx: &egui::Context) -> Option<bool> {
    let mut answer = None;

    egui::Window::new("Exit the app?")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("Are you sure you want to exit?").color(ThemeColors::TEXT_SECONDARY));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
                if ui.button(RichText::new("YES").strong()).clicked() {
                    answer = Some(true);
                }
            });
        });

    answer
}
