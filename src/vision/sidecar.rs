//! Sidecar OCR results
//!
//! Reads recognition output that an external engine already wrote next to the
//! image as `<image>.ocr.json`:
//!
//! ```json
//! { "text": "你好", "blocks": [ { "text": "你好",
//!   "frame": { "top": 10, "left": 20, "width": 80, "height": 30 } } ] }
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

use super::{RecognitionResult, ScriptHint, TextRecognizer, VisionError};

/// Recognizer backed by precomputed JSON files
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarRecognizer;

/// Location of the sidecar file for an image
pub fn sidecar_path(image: &Path) -> PathBuf {
    let mut name = image.as_os_str().to_owned();
    name.push(".ocr.json");
    PathBuf::from(name)
}

impl TextRecognizer for SidecarRecognizer {
    fn recognize(&self, image: &Path, _hint: ScriptHint) -> Result<RecognitionResult, VisionError> {
        let path = sidecar_path(image);
        let content = std::fs::read_to_string(&path).map_err(|source| VisionError::Io {
            path: path.clone(),
            source,
        })?;
        let mut result: RecognitionResult =
            serde_json::from_str(&content).map_err(|source| VisionError::Sidecar {
                path: path.clone(),
                source,
            })?;

        if result.text.is_empty() && !result.blocks.is_empty() {
            result = RecognitionResult::from_blocks(result.blocks);
        }

        debug!("Loaded {} blocks from {:?}", result.blocks.len(), path);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::ImageRect;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_path_appends_suffix() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/menu.jpg")),
            PathBuf::from("/tmp/menu.jpg.ocr.json")
        );
    }

    #[test]
    fn test_reads_blocks_and_derives_text() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("sign.png");
        std::fs::write(
            sidecar_path(&image),
            r#"{"blocks": [
                {"text": "出口", "frame": {"top": 10, "left": 20, "width": 80, "height": 30}},
                {"text": "入口", "frame": {"top": 50, "left": 20, "width": 80, "height": 30}}
            ]}"#,
        )
        .unwrap();

        let result = SidecarRecognizer.recognize(&image, ScriptHint::Chinese).unwrap();

        assert_eq!(result.text, "出口\n入口");
        assert_eq!(result.blocks[1].frame, ImageRect::new(50.0, 20.0, 80.0, 30.0));
    }

    #[test]
    fn test_missing_sidecar_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = SidecarRecognizer
            .recognize(&dir.path().join("none.png"), ScriptHint::Chinese)
            .unwrap_err();

        assert!(matches!(err, VisionError::Io { .. }));
    }

    #[test]
    fn test_malformed_sidecar_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("bad.png");
        std::fs::write(sidecar_path(&image), "{ not json").unwrap();

        let err = SidecarRecognizer.recognize(&image, ScriptHint::Chinese).unwrap_err();

        assert!(matches!(err, VisionError::Sidecar { .. }));
    }
}
