//! Segmentation & Annotation Engine
//!
//! Turns a block of recognized text into words, each character carrying both
//! its Mandarin and Cantonese reading, plus an optional dictionary gloss for
//! the word. Readings for both scripts are computed up front so switching the
//! displayed script never recomputes anything.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::lexicon::{Lexicon, Lexicons, Romanizer, Segmenter, UNKNOWN_SENTINEL};

/// Shown in place of a missing reading or gloss
pub const BLANK_PLACEHOLDER: &str = " ";

/// Which romanization is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptMode {
    /// Pinyin
    #[default]
    Mandarin,
    /// Jyutping
    Cantonese,
}

impl ScriptMode {
    pub fn toggled(self) -> Self {
        match self {
            ScriptMode::Mandarin => ScriptMode::Cantonese,
            ScriptMode::Cantonese => ScriptMode::Mandarin,
        }
    }

    /// Label of the toggle button: the script it switches to
    pub fn toggle_label(self) -> &'static str {
        match self {
            ScriptMode::Mandarin => "j",
            ScriptMode::Cantonese => "p",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScriptMode::Mandarin => "pinyin",
            ScriptMode::Cantonese => "jyutping",
        }
    }
}

/// One character with both readings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedChar {
    pub glyph: char,
    pub pinyin: String,
    pub jyutping: String,
}

impl AnnotatedChar {
    pub fn reading(&self, mode: ScriptMode) -> &str {
        match mode {
            ScriptMode::Mandarin => &self.pinyin,
            ScriptMode::Cantonese => &self.jyutping,
        }
    }
}

/// A segmented word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedWord {
    pub original_text: String,
    pub characters: Vec<AnnotatedChar>,
    /// First dictionary entry's definitions, one per line
    pub gloss: Option<String>,
}

impl AnnotatedWord {
    /// Gloss to display, blank when the word is not in the dictionary
    pub fn gloss_text(&self) -> &str {
        self.gloss.as_deref().unwrap_or(BLANK_PLACEHOLDER)
    }
}

/// Annotated words of a text together with the script to show
#[derive(Debug, Clone)]
pub struct AnnotatedText {
    words: Arc<Vec<AnnotatedWord>>,
    mode: ScriptMode,
}

impl AnnotatedText {
    pub fn words(&self) -> &[AnnotatedWord] {
        &self.words
    }

    pub fn mode(&self) -> ScriptMode {
        self.mode
    }

    /// Displayed reading of every character, word by word
    pub fn readings(&self) -> Vec<Vec<&str>> {
        self.words
            .iter()
            .map(|w| w.characters.iter().map(|c| c.reading(self.mode)).collect())
            .collect()
    }

    /// Index of the word containing the `char_index`-th character of the text
    pub fn word_at_char(&self, char_index: usize) -> Option<usize> {
        let mut start = 0;
        for (i, word) in self.words.iter().enumerate() {
            let end = start + word.characters.len();
            if char_index < end {
                return Some(i);
            }
            start = end;
        }
        None
    }
}

struct AnnotationCache {
    capacity: usize,
    entries: HashMap<String, Arc<Vec<AnnotatedWord>>>,
    order: VecDeque<String>,
}

impl AnnotationCache {
    fn get(&self, text: &str) -> Option<Arc<Vec<AnnotatedWord>>> {
        self.entries.get(text).cloned()
    }

    fn insert(&mut self, text: &str, words: Arc<Vec<AnnotatedWord>>) {
        if self.capacity == 0 || self.entries.contains_key(text) {
            return;
        }
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.entries.insert(text.to_string(), words);
        self.order.push_back(text.to_string());
    }
}

/// Annotation engine over injected collaborators
pub struct Annotator {
    segmenter: Arc<dyn Segmenter>,
    romanizer: Arc<dyn Romanizer>,
    lexicon: Arc<dyn Lexicon>,
    cache: Mutex<AnnotationCache>,
}

impl Annotator {
    pub fn new(
        segmenter: Arc<dyn Segmenter>,
        romanizer: Arc<dyn Romanizer>,
        lexicon: Arc<dyn Lexicon>,
        cache_size: usize,
    ) -> Self {
        Self {
            segmenter,
            romanizer,
            lexicon,
            cache: Mutex::new(AnnotationCache {
                capacity: cache_size,
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Annotator backed by one [`Lexicons`] bundle for all three roles
    pub fn from_lexicons(lexicons: Arc<Lexicons>, cache_size: usize) -> Self {
        Self::new(lexicons.clone(), lexicons.clone(), lexicons, cache_size)
    }

    /// Segment and annotate `text`; the result is cached by text
    pub fn annotate(&self, text: &str, mode: ScriptMode) -> AnnotatedText {
        if let Some(words) = self.cache.lock().get(text) {
            return AnnotatedText { words, mode };
        }

        let words = Arc::new(
            self.split_words(text)
                .into_iter()
                .map(|w| self.annotate_word(w))
                .collect::<Vec<_>>(),
        );
        debug!("Annotated {} chars into {} words", text.chars().count(), words.len());
        self.cache.lock().insert(text, words.clone());

        AnnotatedText { words, mode }
    }

    /// Exact-match gloss: definitions of the first entry joined by newlines
    pub fn gloss(&self, word: &str) -> Option<String> {
        self.lexicon
            .lookup(word)
            .into_iter()
            .next()
            .map(|entry| entry.definitions.join("\n"))
            .filter(|gloss| !gloss.is_empty())
    }

    fn split_words(&self, text: &str) -> Vec<String> {
        let words = self.segmenter.segment(text);
        if words.concat() == text && words.iter().all(|w| !w.is_empty()) {
            return words;
        }
        warn!(
            "Segmenter output does not cover {:?}; falling back to single characters",
            text
        );
        text.chars().map(String::from).collect()
    }

    fn annotate_word(&self, word: String) -> AnnotatedWord {
        let characters = word
            .chars()
            .map(|glyph| AnnotatedChar {
                glyph,
                pinyin: self.mandarin(glyph),
                jyutping: self.cantonese(glyph),
            })
            .collect();
        let gloss = self.gloss(&word);

        AnnotatedWord {
            original_text: word,
            characters,
            gloss,
        }
    }

    fn mandarin(&self, glyph: char) -> String {
        self.romanizer
            .to_mandarin(glyph)
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| BLANK_PLACEHOLDER.to_string())
    }

    fn cantonese(&self, glyph: char) -> String {
        self.romanizer
            .to_cantonese(glyph)
            .filter(|r| !r.trim().is_empty() && r != UNKNOWN_SENTINEL)
            .unwrap_or_else(|| BLANK_PLACEHOLDER.to_string())
    }
}
