//! Reader theme and fonts
//!
//! Warm paper palette for the reading surface, plus a CJK font so glyphs
//! and tone marks render.

use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Paper-like color palette
pub struct ThemeColors;

impl ThemeColors {
    // Background colors
    pub const BG_PAPER: Color32 = Color32::from_rgb(255, 228, 181); // moccasin
    pub const BG_IMAGE: Color32 = Color32::from_rgb(250, 245, 235);
    pub const BG_PANEL: Color32 = Color32::from_rgb(245, 235, 215);

    // Accent colors
    pub const WORD_OPEN_FILL: Color32 = Color32::from_rgb(255, 250, 205); // lemonchiffon
    pub const WORD_OPEN_BORDER: Color32 = Color32::from_rgb(210, 180, 140); // tan
    pub const TOGGLE_FILL: Color32 = Color32::from_rgb(250, 250, 210); // lightgoldenrodyellow
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(178, 34, 34);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(139, 69, 19); // saddlebrown
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(120, 100, 80);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(160, 145, 130);

    // Border colors
    pub const BORDER: Color32 = Color32::from_rgb(222, 200, 160);
}

/// Apply the reader theme to egui
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = Visuals::light();

    // Window and panel backgrounds
    visuals.window_fill = ThemeColors::BG_PANEL;
    visuals.panel_fill = ThemeColors::BG_IMAGE;
    visuals.faint_bg_color = ThemeColors::BG_PANEL;
    visuals.extreme_bg_color = Color32::WHITE;

    // Widget colors
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    visuals.selection.bg_fill = color_with_alpha(ThemeColors::WORD_OPEN_BORDER, 120);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);

    // Window appearance
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);
    visuals.menu_rounding = Rounding::same(6.0);

    style.visuals = visuals;

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(15.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simsun.ttc",
];

/// First usable CJK font: the configured one, else a known system font
pub fn find_cjk_font(configured: Option<&Path>) -> Option<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_CJK_FONTS.iter().map(PathBuf::from))
        .find(|p| p.is_file())
}

/// Add a CJK font as fallback for both font families
///
/// Returns false when no font could be loaded; Chinese text then shows as
/// replacement boxes.
pub fn install_cjk_font(ctx: &egui::Context, configured: Option<&Path>) -> bool {
    let Some(path) = find_cjk_font(configured) else {
        warn!("No CJK font found; set reader.font_path in the config");
        return false;
    };
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read font {:?}: {}", path, e);
            return false;
        }
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), FontData::from_owned(bytes));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);

    info!("Installed CJK font {:?}", path);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_configured_font_wins() {
        let dir = TempDir::new().unwrap();
        let font = dir.path().join("custom.ttf");
        std::fs::write(&font, b"not really a font").unwrap();

        assert_eq!(find_cjk_font(Some(&font)), Some(font));
    }

    #[test]
    fn test_missing_configured_font_is_skipped() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.ttf");

        assert_ne!(find_cjk_font(Some(&missing)), Some(missing));
    }

    #[test]
    fn test_color_with_alpha() {
        let c = color_with_alpha(ThemeColors::TEXT_PRIMARY, 10);
        assert_eq!(c.a(), 10);
    }
}
