//! Vision/OCR Layer
//!
//! Turns a picked image into text regions. Supports multiple OCR backends:
//! - Tesseract CLI (`chi_sim` / `chi_tra` traineddata)
//! - Sidecar JSON files produced by an external recognizer
//!
//! Image decoding and recognition run on a background thread; results are
//! posted back to the UI thread as [`ReaderMessage`]s tagged with the image
//! generation they belong to.

pub mod image_loader;
pub mod sidecar;
pub mod tesseract;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::RecognitionSettings;
use crate::overlay::{GeometryError, ImageRect};

pub use image_loader::{spawn_image_job, DecodedImage};
pub use sidecar::SidecarRecognizer;
pub use tesseract::TesseractRecognizer;

/// OCR backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackend {
    /// Tesseract command line tool
    #[default]
    Tesseract,
    /// Precomputed `<image>.ocr.json` next to the image
    Sidecar,
}

/// Script hint passed to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptHint {
    #[default]
    Chinese,
    Latin,
}

/// A detected block of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// Bounding box in image pixels
    pub frame: ImageRect,
    /// Recognized text content
    pub text: String,
}

/// Full result of recognizing one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// All recognized text, blocks separated by newlines
    #[serde(default)]
    pub text: String,
    /// Detected blocks in reading order
    #[serde(default)]
    pub blocks: Vec<TextRegion>,
}

impl RecognitionResult {
    /// Build a result from blocks, deriving the full text
    pub fn from_blocks(blocks: Vec<TextRegion>) -> Self {
        let text = blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { text, blocks }
    }
}

/// Errors from image decoding and recognition
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid OCR sidecar {path}: {source}")]
    Sidecar {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tesseract failed: {0}")]
    Tesseract(String),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels: {0}")]
    Empty(#[from] GeometryError),
}

/// OCR collaborator: image in, text regions out
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &Path, hint: ScriptHint) -> Result<RecognitionResult, VisionError>;
}

/// Create the recognizer selected in the settings
pub fn create_recognizer(settings: &RecognitionSettings) -> Box<dyn TextRecognizer> {
    match settings.backend {
        OcrBackend::Tesseract => Box::new(TesseractRecognizer::new(
            settings.tesseract_languages.clone(),
            settings.tesseract_psm,
        )),
        OcrBackend::Sidecar => Box::new(SidecarRecognizer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_blocks_joins_text() {
        let result = RecognitionResult::from_blocks(vec![
            TextRegion {
                frame: ImageRect::new(0.0, 0.0, 10.0, 10.0),
                text: "你好".to_string(),
            },
            TextRegion {
                frame: ImageRect::new(20.0, 0.0, 10.0, 10.0),
                text: "世界".to_string(),
            },
        ]);

        assert_eq!(result.text, "你好\n世界");
        assert_eq!(result.blocks.len(), 2);
    }

    #[test]
    fn test_backend_serialization() {
        let json = serde_json::to_string(&OcrBackend::Sidecar).unwrap();
        assert_eq!(json, "\"sidecar\"");
        let parsed: OcrBackend = serde_json::from_str("\"tesseract\"").unwrap();
        assert_eq!(parsed, OcrBackend::Tesseract);
    }
}
