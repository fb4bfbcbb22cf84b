//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::annotation::ScriptMode;
use crate::vision::{OcrBackend, ScriptHint};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Reading surface settings
    pub reader: ReaderSettings,
    /// Text recognition settings
    pub recognition: RecognitionSettings,
    /// Dictionary and romanization data
    pub lexicon: LexiconSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Show jyutping instead of pinyin at startup
    pub start_in_cantonese: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            start_in_cantonese: false,
        }
    }
}

impl GeneralConfig {
    /// Script shown when the reader starts
    pub fn initial_script(&self) -> ScriptMode {
        if self.start_in_cantonese {
            ScriptMode::Cantonese
        } else {
            ScriptMode::Mandarin
        }
    }
}

/// Reading surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Extra tap area around each region, in layout units
    pub region_padding: f32,
    /// Fraction of the sheet width on each side that turns the page
    pub page_turn_zone: f32,
    /// Bottom sheet heights as fractions of the window height
    pub sheet_snap_points: Vec<f32>,
    /// Largest texture side uploaded to the GPU
    pub max_texture_side: u32,
    /// Font with CJK coverage; system fonts are probed when unset
    pub font_path: Option<PathBuf>,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            region_padding: 5.0,
            page_turn_zone: 0.45,
            sheet_snap_points: vec![0.15, 0.5, 0.8],
            max_texture_side: 2000,
            font_path: None,
        }
    }
}

/// Text recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// Which recognizer to run
    pub backend: OcrBackend,
    /// Script the recognizer should expect
    pub script_hint: ScriptHint,
    /// Tesseract `-l` argument
    pub tesseract_languages: String,
    /// Tesseract page segmentation mode
    pub tesseract_psm: u32,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            backend: OcrBackend::Tesseract,
            script_hint: ScriptHint::Chinese,
            tesseract_languages: "chi_sim+chi_tra".to_string(),
            tesseract_psm: 3,
        }
    }
}

/// Dictionary and romanization data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconSettings {
    /// CC-CEDICT file; defaults to `cedict_ts.u8` in the data directory
    pub cedict_path: Option<PathBuf>,
    /// Character to jyutping TSV; defaults to `jyutping.tsv` in the data directory
    pub jyutping_path: Option<PathBuf>,
    /// Longest dictionary word the segmenter will try
    pub max_word_chars: usize,
    /// Number of annotated texts kept in memory
    pub annotation_cache_size: usize,
}

impl Default for LexiconSettings {
    fn default() -> Self {
        Self {
            cedict_path: None,
            jyutping_path: None,
            max_word_chars: 8,
            annotation_cache_size: 256,
        }
    }
}

impl LexiconSettings {
    /// CC-CEDICT path, falling back to the data directory
    pub fn resolved_cedict_path(&self) -> Option<PathBuf> {
        self.cedict_path
            .clone()
            .or_else(|| crate::storage::default_data_file("cedict_ts.u8"))
    }

    /// Jyutping table path, falling back to the data directory
    pub fn resolved_jyutping_path(&self) -> Option<PathBuf> {
        self.jyutping_path
            .clone()
            .or_else(|| crate::storage::default_data_file("jyutping.tsv"))
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        // Check general defaults
        assert_eq!(config.general.log_level, "info");
        assert!(!config.general.start_in_cantonese);
        assert_eq!(config.general.initial_script(), ScriptMode::Mandarin);

        // Check reader defaults
        assert!((config.reader.region_padding - 5.0).abs() < 0.01);
        assert!((config.reader.page_turn_zone - 0.45).abs() < 0.01);
        assert_eq!(config.reader.sheet_snap_points, vec![0.15, 0.5, 0.8]);
        assert!(config.reader.font_path.is_none());

        // Check recognition defaults
        assert_eq!(config.recognition.backend, OcrBackend::Tesseract);
        assert_eq!(config.recognition.tesseract_languages, "chi_sim+chi_tra");

        // Check lexicon defaults
        assert!(config.lexicon.cedict_path.is_none());
        assert_eq!(config.lexicon.max_word_chars, 8);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.reader.sheet_snap_points, parsed.reader.sheet_snap_points);
        assert_eq!(config.recognition.backend, parsed.recognition.backend);
        assert_eq!(config.lexicon.annotation_cache_size, parsed.lexicon.annotation_cache_size);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [general]
            start_in_cantonese = true

            [recognition]
            backend = "sidecar"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.general.initial_script(), ScriptMode::Cantonese);
        assert_eq!(parsed.general.log_level, "info");
        assert_eq!(parsed.recognition.backend, OcrBackend::Sidecar);
        assert_eq!(parsed.recognition.tesseract_psm, 3);
        assert_eq!(parsed.reader.max_texture_side, 2000);
    }

    #[test]
    fn test_explicit_lexicon_paths_win() {
        let settings = LexiconSettings {
            cedict_path: Some(PathBuf::from("/data/cedict.u8")),
            ..Default::default()
        };

        assert_eq!(
            settings.resolved_cedict_path(),
            Some(PathBuf::from("/data/cedict.u8"))
        );
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.reader.page_turn_zone = 0.3;
        config.lexicon.jyutping_path = Some(PathBuf::from("/tmp/jp.tsv"));

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert!((loaded.reader.page_turn_zone - 0.3).abs() < 0.001);
        assert_eq!(loaded.lexicon.jyutping_path, Some(PathBuf::from("/tmp/jp.tsv")));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
