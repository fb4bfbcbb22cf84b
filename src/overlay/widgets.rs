//! Styles for region overlays

use egui::Color32;

/// How region tap targets are drawn
#[derive(Debug, Clone)]
pub struct RegionStyle {
    /// Fill of the selected region (RGBA)
    pub selected_fill: [u8; 4],
    /// Fill of every other region (RGBA)
    pub idle_fill: [u8; 4],
    /// Outline of every region (RGBA)
    pub outline: [u8; 4],
    /// Outline width
    pub outline_width: f32,
    /// Corner radius
    pub corner_radius: f32,
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self {
            selected_fill: [255, 255, 0, 102],
            idle_fill: [0, 0, 0, 0],
            outline: [139, 69, 19, 90],
            outline_width: 1.0,
            corner_radius: 2.0,
        }
    }
}

impl RegionStyle {
    pub fn fill(&self, selected: bool) -> Color32 {
        let [r, g, b, a] = if selected { self.selected_fill } else { self.idle_fill };
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn outline_color(&self) -> Color32 {
        let [r, g, b, a] = self.outline;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}
