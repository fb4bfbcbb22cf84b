//! Top bar: image path field, Open button and status

use egui::RichText;
use std::path::PathBuf;

use crate::dashboard::theme::ThemeColors;
use crate::reader::{PickOutcome, ReaderStatus};

/// Turn the path field into a pick outcome
pub fn pick_from_input(input: &str) -> PickOutcome {
    let trimmed = input.trim().trim_matches('"');
    if trimmed.is_empty() {
        return PickOutcome::Cancelled;
    }
    let path = PathBuf::from(trimmed);
    if path.is_file() {
        PickOutcome::Picked(path)
    } else {
        PickOutcome::Failed(format!("No such file: {}", path.display()))
    }
}

/// First file dropped onto the window this frame
pub fn dropped_image(ctx: &egui::Context) -> Option<PickOutcome> {
    ctx.input(|i| {
        i.raw
            .dropped_files
            .iter()
            .find_map(|f| f.path.clone())
            .map(PickOutcome::Picked)
    })
}

fn status_text(status: &ReaderStatus, region_count: usize) -> (String, egui::Color32) {
    match status {
        ReaderStatus::Empty => ("Open or drop an image".to_string(), ThemeColors::TEXT_MUTED),
        ReaderStatus::Loading => ("Recognizing text…".to_string(), ThemeColors::TEXT_SECONDARY),
        ReaderStatus::Ready => (format!("{region_count} text regions"), ThemeColors::TEXT_SECONDARY),
        ReaderStatus::Failed(error) => (error.clone(), ThemeColors::ACCENT_ERROR),
    }
}

/// Render the toolbar; returns a pick when the user asked to open a file
pub fn render_toolbar(
    ui: &mut egui::Ui,
    path_input: &mut String,
    status: &ReaderStatus,
    region_count: usize,
) -> Option<PickOutcome> {
    let mut outcome = None;

    ui.horizontal(|ui| {
        let field = ui.add(
            egui::TextEdit::singleline(path_input)
                .hint_text("Image path")
                .desired_width(360.0),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Open").clicked() || submitted {
            outcome = Some(pick_from_input(path_input));
        }

        if *status == ReaderStatus::Loading {
            ui.spinner();
        }
        let (text, color) = status_text(status, region_count);
        ui.label(RichText::new(text).color(color));
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_input_cancels() {
        assert_eq!(pick_from_input("   "), PickOutcome::Cancelled);
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(matches!(
            pick_from_input("/definitely/not/here.png"),
            PickOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_existing_file_is_picked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.jpg");
        std::fs::write(&path, b"jpg").unwrap();

        let quoted = format!("\"{}\"", path.display());
        assert_eq!(pick_from_input(&quoted), PickOutcome::Picked(path));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(&ReaderStatus::Ready, 3).0, "3 text regions");
        assert_eq!(
            status_text(&ReaderStatus::Failed("boom".into()), 0),
            ("boom".to_string(), ThemeColors::ACCENT_ERROR)
        );
    }
}
