//! Hanzi Reader - tap Chinese text in photos to read it

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hanzi_reader::annotation::{AnnotatedText, Annotator, BLANK_PLACEHOLDER};
use hanzi_reader::config::{self, AppConfig};
use hanzi_reader::dashboard::run_reader;
use hanzi_reader::lexicon::Lexicons;
use hanzi_reader::shared::SharedAppState;
use hanzi_reader::storage;

/// Hanzi Reader - pinyin and jyutping for text in photos
#[derive(Parser, Debug)]
#[command(name = "hanzi-reader")]
#[command(about = "Read Chinese text in images with pinyin, jyutping and glosses")]
struct Args {
    /// Image to open at startup
    image: Option<PathBuf>,

    /// Configuration file (default: config.toml in the config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "hanzi_reader=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Show jyutping instead of pinyin
    #[arg(long)]
    cantonese: bool,

    /// Print the annotation of TEXT and exit without opening a window
    #[arg(long, value_name = "TEXT")]
    annotate: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .or_else(|| storage::get_config_dir().ok().map(|dir| dir.join("config.toml")));
    let loaded = config_path
        .as_deref()
        .filter(|p| p.exists())
        .map(|p| config::load_config(p).with_context(|| format!("Invalid configuration {:?}", p)));
    let mut config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    if args.cantonese {
        config.general.start_in_cantonese = true;
    }

    // Initialize logging
    let level = args.log_level.as_deref().unwrap_or(&config.general.log_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &loaded {
        Some(Ok(_)) => info!("Loaded configuration from {:?}", config_path),
        Some(Err(e)) => warn!("{:#}; using defaults", e),
        None => {
            info!("Using default configuration");
            if let Some(path) = &config_path {
                write_default_config(&config, path);
            }
        }
    }

    if let Some(text) = args.annotate {
        return print_annotation(&config, &text);
    }

    info!("Hanzi Reader starting...");

    let shared_state = Arc::new(RwLock::new(reader_state(config, config_path, loaded.as_ref())));

    run_reader(shared_state, args.image).map_err(|e| anyhow::anyhow!("Reader window failed: {}", e))?;

    info!("Hanzi Reader shutdown complete");

    Ok(())
}

/// State for the reader window
///
/// A configuration file that failed to load is never written back, so the
/// user's file survives until they fix it.
fn reader_state(
    config: AppConfig,
    config_path: Option<PathBuf>,
    loaded: Option<&Result<AppConfig>>,
) -> SharedAppState {
    let state = SharedAppState::new(config);
    match (config_path, loaded) {
        (Some(path), Some(Ok(_)) | None) => state.with_config_path(path),
        _ => state,
    }
}

fn write_default_config(config: &AppConfig, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("Could not create {:?}: {}", parent, e);
            return;
        }
    }
    match config::save_config(config, path) {
        Ok(()) => info!("Wrote default configuration to {:?}", path),
        Err(e) => warn!("Could not write default configuration to {:?}: {}", path, e),
    }
}

/// Headless mode: one line per word with readings and gloss
fn print_annotation(config: &AppConfig, text: &str) -> Result<()> {
    let lexicons = Arc::new(Lexicons::load(&config.lexicon));
    if lexicons.is_empty() {
        warn!("No lexicon data loaded; readings will be blank");
    }
    let annotator = Annotator::from_lexicons(lexicons, config.lexicon.annotation_cache_size);
    let annotated = annotator.annotate(text, config.general.initial_script());

    for line in format_annotation(&annotated) {
        println!("{line}");
    }
    Ok(())
}

fn format_annotation(annotated: &AnnotatedText) -> Vec<String> {
    annotated
        .words()
        .iter()
        .zip(annotated.readings())
        .filter(|(word, _)| !word.original_text.trim().is_empty())
        .map(|(word, readings)| {
            let readings: Vec<&str> = readings
                .into_iter()
                .map(|r| if r == BLANK_PLACEHOLDER { "-" } else { r })
                .collect();
            format!(
                "{}\t{}\t{}",
                word.original_text,
                readings.join(" "),
                word.gloss_text().replace('\n', "; ")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzi_reader::annotation::ScriptMode;
    use hanzi_reader::lexicon::{CedictDictionary, JyutpingTable};

    #[test]
    fn test_format_annotation() {
        let dictionary = CedictDictionary::from_cedict_str(
            "你好 你好 [ni3 hao3] /hello/hi/\n你 你 [ni3] /you/\n好 好 [hao3] /good/\n",
        )
        .unwrap();
        let jyutping = JyutpingTable::from_tsv_str("你\tnei5\n").unwrap();
        let annotator = Annotator::from_lexicons(Arc::new(Lexicons::new(dictionary, jyutping, 8)), 4);

        let lines = format_annotation(&annotator.annotate("你好 猫", ScriptMode::Cantonese));

        assert_eq!(lines, vec!["你好\tnei5 -\thello; hi", "猫\t-\t "]);
    }

    #[test]
    fn test_invalid_config_is_not_overwritten() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let contents = "[reader]\nregion_padding = \"x\"\n";
        std::fs::write(&path, contents).unwrap();

        let loaded = config::load_config(&path);
        assert!(loaded.is_err());
        let mut state = reader_state(AppConfig::default(), Some(path.clone()), Some(&loaded));
        state.config.general.start_in_cantonese = true;
        state.persist_config().unwrap();

        assert!(state.config_path.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn test_loaded_config_is_persisted() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        config::save_config(&AppConfig::default(), &path).unwrap();

        let loaded = config::load_config(&path);
        let mut state = reader_state(AppConfig::default(), Some(path.clone()), Some(&loaded));
        state.config.general.start_in_cantonese = true;
        state.persist_config().unwrap();

        assert!(config::load_config(&path).unwrap().general.start_in_cantonese);
    }

    #[test]
    fn test_missing_config_gets_a_path() {
        let path = PathBuf::from("/nonexistent/config.toml");
        let state = reader_state(AppConfig::default(), Some(path.clone()), None);
        assert_eq!(state.config_path, Some(path));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["hanzi-reader", "menu.jpg", "--cantonese", "--log-level", "debug"]);

        assert_eq!(args.image, Some(PathBuf::from("menu.jpg")));
        assert!(args.cantonese);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.annotate.is_none());
    }
}
