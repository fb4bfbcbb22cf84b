//! Reading sheet contents
//!
//! Words are laid out as ruby: each character's reading above its glyph.
//! Every tap inside the sheet also reaches the page-turn layer, after any
//! word or toggle handling of the same tap.

use egui::{Align, Color32, Layout, Order, RichText, Sense, Stroke};

use crate::annotation::{AnnotatedText, AnnotatedWord, ScriptMode};
use crate::dashboard::theme::ThemeColors;
use crate::reader::{Effect, InteractionController, PageDirection, SurfaceTap};

fn render_word(ui: &mut egui::Ui, word: &AnnotatedWord, mode: ScriptMode, open: bool) -> egui::Response {
    let (fill, stroke) = if open {
        (ThemeColors::WORD_OPEN_FILL, Stroke::new(1.0, ThemeColors::WORD_OPEN_BORDER))
    } else {
        (Color32::TRANSPARENT, Stroke::NONE)
    };

    egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(4.0)
        .inner_margin(egui::Margin::symmetric(3.0, 2.0))
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(2.0, 0.0);
            ui.horizontal(|ui| {
                for ch in &word.characters {
                    ui.vertical_centered(|ui| {
                        ui.add(
                            egui::Label::new(
                                RichText::new(ch.reading(mode))
                                    .size(13.0)
                                    .color(ThemeColors::TEXT_SECONDARY),
                            )
                            .selectable(false),
                        );
                        ui.add(
                            egui::Label::new(
                                RichText::new(ch.glyph.to_string())
                                    .size(28.0)
                                    .color(ThemeColors::TEXT_PRIMARY),
                            )
                            .selectable(false),
                        );
                    });
                }
            });
        })
        .response
        .interact(Sense::click())
}

fn render_popover(ctx: &egui::Context, anchor: egui::Rect, gloss: &str) -> egui::Rect {
    egui::Area::new(egui::Id::new("gloss_popover"))
        .order(Order::Foreground)
        .fixed_pos(anchor.left_bottom() + egui::vec2(0.0, 4.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(ThemeColors::WORD_OPEN_FILL)
                .stroke(Stroke::new(1.0, ThemeColors::WORD_OPEN_BORDER))
                .show(ui, |ui| {
                    ui.set_max_width(280.0);
                    ui.label(RichText::new(gloss).color(ThemeColors::TEXT_PRIMARY));
                });
        })
        .response
        .rect
}

/// Render the sheet contents and dispatch taps to the controller
///
/// `popover_rect` carries the gloss popover's rect between frames so taps on
/// it are not treated as sheet taps.
pub fn render_reading_view(
    ui: &mut egui::Ui,
    controller: &mut InteractionController,
    annotated: Option<&AnnotatedText>,
    page_turn_zone: f32,
    popover_rect: &mut Option<egui::Rect>,
) -> Vec<Effect> {
    let sheet_rect = ui.available_rect_before_wrap();
    let tap = ui
        .input(|i| i.pointer.primary_clicked().then(|| i.pointer.interact_pos()).flatten())
        .filter(|pos| sheet_rect.contains(*pos))
        .filter(|pos| !popover_rect.is_some_and(|r| r.contains(*pos)));

    let mut toggled = false;
    let mut word_tapped = None;
    let mut open_anchor = None;

    ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
        let label = RichText::new(controller.script().toggle_label())
            .size(18.0)
            .color(ThemeColors::TEXT_PRIMARY);
        let button = egui::Button::new(label)
            .fill(ThemeColors::TOGGLE_FILL)
            .rounding(18.0)
            .min_size(egui::vec2(36.0, 36.0));
        toggled = ui.add(button).clicked();
    });

    match (controller.selected_region(), annotated) {
        (Some(_), Some(annotated)) => {
            let open = controller.open_phrase();
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (i, word) in annotated.words().iter().enumerate() {
                        let response = render_word(ui, word, annotated.mode(), open == Some(i));
                        if response.clicked() {
                            word_tapped = Some(i);
                        }
                        if open == Some(i) {
                            open_anchor = Some((response.rect, word.gloss_text().to_string()));
                        }
                    }
                });
            });
        }
        _ => {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("no block selected").color(ThemeColors::TEXT_MUTED));
            });
        }
    }

    *popover_rect = open_anchor.map(|(anchor, gloss)| render_popover(ui.ctx(), anchor, &gloss));

    controller.surface_tapped(SurfaceTap {
        toggle: toggled,
        word: word_tapped,
        page_layer: tap.is_some(),
        zone: tap.and_then(|pos| {
            PageDirection::from_tap(pos.x - sheet_rect.left(), sheet_rect.width(), page_turn_zone)
        }),
    })
}
