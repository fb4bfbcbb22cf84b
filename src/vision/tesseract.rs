//! Tesseract CLI backend
//!
//! Runs `tesseract <image> stdout -l <langs> --psm <n> tsv` and groups the
//! word rows by block number, which gives paragraph-sized regions similar to
//! what mobile OCR kits return as "blocks".

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::{RecognitionResult, ScriptHint, TextRecognizer, TextRegion, VisionError};
use crate::overlay::ImageRect;

/// Recognizer that shells out to the `tesseract` binary
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    languages: String,
    psm: u32,
}

impl TesseractRecognizer {
    pub fn new(languages: impl Into<String>, psm: u32) -> Self {
        Self {
            languages: languages.into(),
            psm,
        }
    }

    fn languages_for(&self, hint: ScriptHint) -> &str {
        match hint {
            ScriptHint::Chinese => &self.languages,
            ScriptHint::Latin => "eng",
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &Path, hint: ScriptHint) -> Result<RecognitionResult, VisionError> {
        let languages = self.languages_for(hint);
        info!("Running tesseract on {:?} (langs: {}, psm: {})", image, languages, self.psm);

        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(languages)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("tsv")
            .output()
            .map_err(|e| VisionError::Tesseract(format!("failed to run tesseract (is it installed?): {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VisionError::Tesseract(stderr.trim().to_string()));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let blocks = parse_tsv_blocks(&tsv);
        debug!("tesseract produced {} blocks", blocks.len());
        Ok(RecognitionResult::from_blocks(blocks))
    }
}

struct BlockBuilder {
    frame: Option<ImageRect>,
    text: String,
}

/// Parse tesseract TSV output into block-level regions
///
/// Only word rows (level 5) with a non-negative confidence are used. Words,
/// including the last and first words of consecutive lines, are joined
/// without a separator when either side is CJK and with a space otherwise.
pub fn parse_tsv_blocks(tsv: &str) -> Vec<TextRegion> {
    let mut blocks: BTreeMap<(i32, i32), BlockBuilder> = BTreeMap::new();

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }
        let level: i32 = cols[0].parse().unwrap_or(0);
        if level != 5 {
            continue;
        }
        let conf: f32 = cols[10].parse().unwrap_or(-1.0);
        let word = cols[11].trim();
        if word.is_empty() || conf < 0.0 {
            continue;
        }

        let page: i32 = cols[1].parse().unwrap_or(0);
        let block: i32 = cols[2].parse().unwrap_or(0);
        let left: f32 = cols[6].parse().unwrap_or(0.0);
        let top: f32 = cols[7].parse().unwrap_or(0.0);
        let width: f32 = cols[8].parse().unwrap_or(0.0);
        let height: f32 = cols[9].parse().unwrap_or(0.0);
        let word_rect = ImageRect::new(top, left, width, height);

        let builder = blocks.entry((page, block)).or_insert_with(|| BlockBuilder {
            frame: None,
            text: String::new(),
        });

        if needs_space(&builder.text, word) {
            builder.text.push(' ');
        }
        builder.text.push_str(word);
        builder.frame = Some(match builder.frame {
            Some(frame) => frame.union(&word_rect),
            None => word_rect,
        });
    }

    blocks
        .into_values()
        .filter_map(|b| {
            b.frame.map(|frame| TextRegion {
                frame,
                text: b.text,
            })
        })
        .collect()
}

fn is_cjk(ch: char) -> bool {
    matches!(ch as u32,
        0x3000..=0x303F | 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF
        | 0xFF00..=0xFFEF | 0x20000..=0x2FA1F)
}

fn needs_space(left: &str, right: &str) -> bool {
    match (left.chars().last(), right.chars().next()) {
        (Some(l), Some(r)) => !is_cjk(l) && !is_cjk(r),
        _ => false,
    }
}
