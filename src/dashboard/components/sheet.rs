//! Bottom sheet with a drag handle

use egui::{Rounding, Sense};

use crate::dashboard::state::SheetState;
use crate::dashboard::theme::ThemeColors;

const HANDLE_HEIGHT: f32 = 18.0;

/// Show the sheet if it is open
///
/// Returns true when the user dragged it closed.
pub fn render_bottom_sheet(
    ctx: &egui::Context,
    sheet: &mut SheetState,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    if !sheet.is_open() {
        return false;
    }

    let window_height = ctx.screen_rect().height();
    let height = (sheet.height_fraction() * window_height).max(HANDLE_HEIGHT);
    let mut dismissed = false;

    egui::TopBottomPanel::bottom("reading_sheet")
        .exact_height(height)
        .resizable(false)
        .frame(
            egui::Frame::none()
                .fill(ThemeColors::BG_PAPER)
                .rounding(Rounding {
                    nw: 12.0,
                    ne: 12.0,
                    sw: 0.0,
                    se: 0.0,
                }),
        )
        .show(ctx, |ui| {
            let (handle_rect, handle) =
                ui.allocate_exact_size(egui::vec2(ui.available_width(), HANDLE_HEIGHT), Sense::drag());
            ui.painter().rect_filled(
                egui::Rect::from_center_size(handle_rect.center(), egui::vec2(40.0, 5.0)),
                Rounding::same(2.5),
                ThemeColors::BORDER,
            );

            if handle.dragged() {
                if let Some(pointer) = handle.interact_pointer_pos() {
                    let bottom = ctx.screen_rect().bottom();
                    sheet.drag_to((bottom - pointer.y) / window_height.max(1.0));
                }
            }
            if handle.drag_stopped() {
                dismissed = sheet.release();
            }

            if !dismissed {
                add_contents(ui);
            }
        });

    dismissed
}
