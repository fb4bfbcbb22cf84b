//! Background image decoding and recognition

use image::imageops::FilterType;
use image::GenericImageView;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{error, info, warn};

use super::{ScriptHint, TextRecognizer, VisionError};
use crate::overlay::ImageDimensions;
use crate::shared::{MessageSender, ReaderMessage};

/// A decoded image ready to be uploaded as a texture
pub struct DecodedImage {
    /// Natural pixel size of the source file
    pub dimensions: ImageDimensions,
    /// Size of `rgba`, possibly downscaled for display
    pub texture_size: [usize; 2],
    /// Unmultiplied RGBA pixels
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("dimensions", &self.dimensions)
            .field("texture_size", &self.texture_size)
            .field("rgba_len", &self.rgba.len())
            .finish()
    }
}

/// Decode an image file, keeping its natural dimensions
///
/// The pixel buffer is shrunk so that neither side exceeds `max_texture_side`;
/// the reported dimensions always describe the original file, which is the
/// space OCR frames are expressed in.
pub fn decode_image(path: &Path, max_texture_side: u32) -> Result<DecodedImage, VisionError> {
    let image = image::open(path)?;
    let (width, height) = image.dimensions();
    let dimensions = ImageDimensions::new(width as f32, height as f32)?;

    let max_side = max_texture_side.max(1);
    let display = if width > max_side || height > max_side {
        image.resize(max_side, max_side, FilterType::Triangle)
    } else {
        image
    };
    let rgba = display.to_rgba8();
    let texture_size = [rgba.width() as usize, rgba.height() as usize];

    Ok(DecodedImage {
        dimensions,
        texture_size,
        rgba: rgba.into_raw(),
    })
}

/// Decode and recognize `path` on a background thread
///
/// Posts [`ReaderMessage::ImageDecoded`] (or `ImageFailed`) followed by
/// [`ReaderMessage::RecognitionFinished`], all tagged with `generation`.
pub fn spawn_image_job(
    path: PathBuf,
    generation: u64,
    recognizer: Arc<dyn TextRecognizer>,
    hint: ScriptHint,
    max_texture_side: u32,
    sender: MessageSender,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        info!("Loading image {:?} (generation {})", path, generation);

        match decode_image(&path, max_texture_side) {
            Ok(image) => {
                if !sender.send(ReaderMessage::ImageDecoded { generation, image }) {
                    return;
                }
            }
            Err(e) => {
                error!("Image load failed for {:?}: {}", path, e);
                sender.send(ReaderMessage::ImageFailed {
                    generation,
                    error: e.to_string(),
                });
                return;
            }
        }

        let result = recognizer.recognize(&path, hint).map_err(|e| {
            warn!("Text recognition failed for {:?}: {}", path, e);
            e.to_string()
        });
        sender.send(ReaderMessage::RecognitionFinished { generation, result });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::ImageRect;
    use crate::shared::reader_channel;
    use crate::vision::{RecognitionResult, TextRegion};
    use tempfile::TempDir;

    struct FixedRecognizer;

    impl TextRecognizer for FixedRecognizer {
        fn recognize(&self, _image: &Path, _hint: ScriptHint) -> Result<RecognitionResult, VisionError> {
            Ok(RecognitionResult::from_blocks(vec![TextRegion {
                frame: ImageRect::new(1.0, 1.0, 2.0, 2.0),
                text: "字".to_string(),
            }]))
        }
    }

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        image::RgbaImage::new(width, height).save(&path).unwrap();
        path
    }

    #[test]
    fn test_decode_keeps_natural_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "wide.png", 400, 100);

        let decoded = decode_image(&path, 200).unwrap();

        assert_eq!(decoded.dimensions.width(), 400.0);
        assert_eq!(decoded.dimensions.height(), 100.0);
        assert_eq!(decoded.texture_size, [200, 50]);
        assert_eq!(decoded.rgba.len(), 200 * 50 * 4);
    }

    #[test]
    fn test_decode_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(decode_image(&dir.path().join("missing.png"), 100).is_err());
    }

    #[test]
    fn test_job_posts_decode_then_recognition() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "small.png", 8, 4);
        let (tx, rx) = reader_channel();

        spawn_image_job(path, 7, Arc::new(FixedRecognizer), ScriptHint::Chinese, 100, tx)
            .join()
            .unwrap();

        match rx.recv().unwrap() {
            ReaderMessage::ImageDecoded { generation, image } => {
                assert_eq!(generation, 7);
                assert_eq!(image.texture_size, [8, 4]);
            }
            other => panic!("unexpected message {other:?}"),
        }
        match rx.recv().unwrap() {
            ReaderMessage::RecognitionFinished { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().blocks.len(), 1);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_job_reports_decode_failure() {
        let dir = TempDir::new().unwrap();
        let (tx, rx) = reader_channel();

        spawn_image_job(
            dir.path().join("nope.png"),
            3,
            Arc::new(FixedRecognizer),
            ScriptHint::Chinese,
            100,
            tx,
        )
        .join()
        .unwrap();

        assert!(matches!(
            rx.recv().unwrap(),
            ReaderMessage::ImageFailed { generation: 3, .. }
        ));
        assert!(rx.try_recv().is_err());
    }
}
