//! Lexicon Layer
//!
//! Collaborators used by the annotation engine:
//! - [`Segmenter`] splits text into words
//! - [`Romanizer`] gives per-character Mandarin and Cantonese readings
//! - [`Lexicon`] looks up dictionary entries for a word
//!
//! [`Lexicons`] bundles the CC-CEDICT dictionary, a jyutping table and the
//! dictionary segmenter, and implements all three.

pub mod cedict;
pub mod jyutping;
pub mod pinyin;
pub mod segment;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::LexiconSettings;
use crate::shared::{MessageSender, ReaderMessage};

pub use cedict::CedictDictionary;
pub use jyutping::JyutpingTable;
pub use segment::DictionarySegmenter;

/// Reading returned by some Cantonese sources for characters they do not know
pub const UNKNOWN_SENTINEL: &str = "[...]";

/// One dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub traditional: String,
    pub simplified: String,
    /// Numbered pinyin as written in the source, e.g. `ni3 hao3`
    pub pinyin: String,
    pub definitions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Splits text into words whose concatenation is the input
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Per-character readings
pub trait Romanizer: Send + Sync {
    /// Tone-marked pinyin, or `None` when unknown
    fn to_mandarin(&self, ch: char) -> Option<String>;
    /// Jyutping; may be [`UNKNOWN_SENTINEL`] or `None` when unknown
    fn to_cantonese(&self, ch: char) -> Option<String>;
}

/// Dictionary lookups
pub trait Lexicon: Send + Sync {
    /// Entries for `word` in dictionary order, empty when not found
    fn lookup(&self, word: &str) -> Vec<LexiconEntry>;
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        DictionarySegmenter::segment(self, text)
    }
}

impl Lexicon for CedictDictionary {
    fn lookup(&self, word: &str) -> Vec<LexiconEntry> {
        CedictDictionary::lookup(self, word)
    }
}

/// All lexicon data needed for annotation
pub struct Lexicons {
    dictionary: Arc<CedictDictionary>,
    jyutping: JyutpingTable,
    segmenter: DictionarySegmenter,
}

impl std::fmt::Debug for Lexicons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicons")
            .field("dictionary_entries", &self.dictionary.len())
            .field("jyutping_chars", &self.jyutping.len())
            .finish()
    }
}

impl Lexicons {
    pub fn new(dictionary: CedictDictionary, jyutping: JyutpingTable, max_word_chars: usize) -> Self {
        let dictionary = Arc::new(dictionary);
        let segmenter = DictionarySegmenter::new(dictionary.clone(), max_word_chars);
        Self {
            dictionary,
            jyutping,
            segmenter,
        }
    }

    /// Load the data files named in `settings`
    ///
    /// A missing or unreadable file is logged and replaced with empty data, so
    /// the reader still works without dictionaries installed.
    pub fn load(settings: &LexiconSettings) -> Self {
        let dictionary = load_or_empty(
            "CC-CEDICT",
            settings.resolved_cedict_path(),
            |p: &Path| CedictDictionary::from_path(p),
        );
        let jyutping = load_or_empty(
            "jyutping table",
            settings.resolved_jyutping_path(),
            |p: &Path| JyutpingTable::from_path(p),
        );
        info!(
            "Lexicons loaded: {} dictionary entries, {} jyutping characters",
            dictionary.len(),
            jyutping.len()
        );
        Self::new(dictionary, jyutping, settings.max_word_chars)
    }

    pub fn dictionary(&self) -> &CedictDictionary {
        &self.dictionary
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty() && self.jyutping.is_empty()
    }
}

fn load_or_empty<T: Default>(
    what: &str,
    path: Option<PathBuf>,
    load: impl Fn(&Path) -> Result<T, LexiconError>,
) -> T {
    let Some(path) = path else {
        warn!("No {} path configured", what);
        return T::default();
    };
    if !path.exists() {
        warn!("{} not found at {:?}; readings will be blank", what, path);
        return T::default();
    }
    match load(&path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {} from {:?}: {}", what, path, e);
            T::default()
        }
    }
}

impl Segmenter for Lexicons {
    fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }
}

impl Romanizer for Lexicons {
    fn to_mandarin(&self, ch: char) -> Option<String> {
        self.dictionary.mandarin_reading(ch)
    }

    fn to_cantonese(&self, ch: char) -> Option<String> {
        self.jyutping.reading(ch).map(str::to_string)
    }
}

impl Lexicon for Lexicons {
    fn lookup(&self, word: &str) -> Vec<LexiconEntry> {
        self.dictionary.lookup(word)
    }
}

/// Load lexicons on a background thread and post [`ReaderMessage::LexiconReady`]
pub fn spawn_lexicon_warmup(settings: LexiconSettings, sender: MessageSender) -> JoinHandle<()> {
    std::thread::spawn(move || {
        info!("Warming up lexicons");
        let lexicons = Arc::new(Lexicons::load(&settings));
        sender.send(ReaderMessage::LexiconReady(lexicons));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::reader_channel;
    use tempfile::TempDir;

    fn write_data(dir: &TempDir) -> LexiconSettings {
        let cedict = dir.path().join("cedict_ts.u8");
        let jyutping = dir.path().join("jyutping.tsv");
        std::fs::write(&cedict, "你好 你好 [ni3 hao3] /hello/hi/\n你 你 [ni3] /you/\n").unwrap();
        std::fs::write(&jyutping, "你\tnei5\n好\thou2\n").unwrap();
        LexiconSettings {
            cedict_path: Some(cedict),
            jyutping_path: Some(jyutping),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_bundles_all_collaborators() {
        let dir = TempDir::new().unwrap();
        let lexicons = Lexicons::load(&write_data(&dir));

        assert_eq!(Segmenter::segment(&lexicons, "你好"), vec!["你好"]);
        assert_eq!(lexicons.to_mandarin('你').as_deref(), Some("nǐ"));
        assert_eq!(lexicons.to_cantonese('好').as_deref(), Some("hou2"));
        assert_eq!(lexicons.to_mandarin('好'), None);
        assert_eq!(Lexicon::lookup(&lexicons, "你好")[0].definitions, vec!["hello", "hi"]);
    }

    #[test]
    fn test_missing_files_give_empty_data() {
        let dir = TempDir::new().unwrap();
        let settings = LexiconSettings {
            cedict_path: Some(dir.path().join("missing.u8")),
            jyutping_path: Some(dir.path().join("missing.tsv")),
            ..Default::default()
        };

        let lexicons = Lexicons::load(&settings);

        assert!(lexicons.is_empty());
        assert_eq!(Segmenter::segment(&lexicons, "你好"), vec!["你", "好"]);
    }

    #[test]
    fn test_malformed_file_gives_empty_data() {
        let dir = TempDir::new().unwrap();
        let mut settings = write_data(&dir);
        let bad = dir.path().join("bad.u8");
        std::fs::write(&bad, "not a cedict line\n").unwrap();
        settings.cedict_path = Some(bad);

        let lexicons = Lexicons::load(&settings);

        assert!(lexicons.dictionary().is_empty());
        assert_eq!(lexicons.to_cantonese('你').as_deref(), Some("nei5"));
    }

    #[test]
    fn test_warmup_posts_ready() {
        let dir = TempDir::new().unwrap();
        let (tx, rx) = reader_channel();

        spawn_lexicon_warmup(write_data(&dir), tx).join().unwrap();

        match rx.recv().unwrap() {
            ReaderMessage::LexiconReady(lexicons) => assert_eq!(lexicons.dictionary().len(), 2),
            other => panic!("unexpected message {other:?}"),
        }
    }
}
