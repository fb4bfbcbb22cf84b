//! CC-CEDICT dictionary
//!
//! Line format: `傳統 传统 [chuan2 tong3] /tradition/traditional/`. Lines
//! starting with `#` are comments.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::pinyin::reading_to_marked;
use super::{LexiconEntry, LexiconError};

/// In-memory CC-CEDICT, indexed by both traditional and simplified headwords
#[derive(Debug, Default)]
pub struct CedictDictionary {
    entries: Vec<LexiconEntry>,
    index: HashMap<String, Vec<usize>>,
    longest_word: usize,
}

impl CedictDictionary {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_cedict_str(&s)
    }

    pub fn from_cedict_str(s: &str) -> Result<Self, LexiconError> {
        let mut dict = Self::default();

        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = parse_line(line).map_err(|reason| LexiconError::Malformed {
                line: idx + 1,
                reason,
            })?;
            dict.insert(entry);
        }

        Ok(dict)
    }

    fn insert(&mut self, entry: LexiconEntry) {
        let id = self.entries.len();
        self.longest_word = self
            .longest_word
            .max(entry.traditional.chars().count())
            .max(entry.simplified.chars().count());

        self.index.entry(entry.traditional.clone()).or_default().push(id);
        if entry.simplified != entry.traditional {
            self.index.entry(entry.simplified.clone()).or_default().push(id);
        }
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in characters of the longest headword
    pub fn longest_word(&self) -> usize {
        self.longest_word
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// All entries whose traditional or simplified form equals `word`, in file order
    pub fn lookup(&self, word: &str) -> Vec<LexiconEntry> {
        self.index
            .get(word)
            .map(|ids| ids.iter().map(|&id| self.entries[id].clone()).collect())
            .unwrap_or_default()
    }

    /// Tone-marked Mandarin reading of a single character
    ///
    /// Prefers an entry that is not only a surname or variant cross-reference,
    /// which keeps `了` as `le` rather than the rarer readings listed first.
    pub fn mandarin_reading(&self, ch: char) -> Option<String> {
        let mut buf = [0u8; 4];
        let key: &str = ch.encode_utf8(&mut buf);
        let ids = self.index.get(key)?;
        let entry = ids
            .iter()
            .map(|&id| &self.entries[id])
            .find(|e| !is_secondary(e))
            .or_else(|| ids.first().map(|&id| &self.entries[id]))?;
        Some(reading_to_marked(&entry.pinyin.to_lowercase()))
    }
}

fn is_secondary(entry: &LexiconEntry) -> bool {
    entry.definitions.iter().all(|d| {
        d.starts_with("surname ")
            || d.starts_with("variant of ")
            || d.starts_with("old variant of ")
            || d.starts_with("used in ")
            || d.starts_with("see ")
    })
}

fn parse_line(line: &str) -> Result<LexiconEntry, String> {
    let (traditional, rest) = line
        .split_once(' ')
        .ok_or_else(|| "missing simplified headword".to_string())?;
    let (simplified, rest) = rest
        .split_once(' ')
        .ok_or_else(|| "missing pinyin".to_string())?;

    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('[')
        .ok_or_else(|| "pinyin must start with '['".to_string())?;
    let (pinyin, rest) = rest
        .split_once(']')
        .ok_or_else(|| "unterminated pinyin".to_string())?;

    let rest = rest.trim();
    if !rest.starts_with('/') {
        return Err("definitions must start with '/'".to_string());
    }
    let definitions: Vec<String> = rest
        .split('/')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();

    Ok(LexiconEntry {
        traditional: traditional.to_string(),
        simplified: simplified.to_string(),
        pinyin: pinyin.trim().to_string(),
        definitions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
# CC-CEDICT sample
你好 你好 [ni3 hao3] /hello/hi/
世界 世界 [shi4 jie4] /world/CL:個|个[ge4]/
了 了 [le5] /(modal particle)/
了 了 [liao3] /to finish/
傳統 传统 [chuan2 tong3] /tradition/traditional/
王 王 [Wang2] /surname Wang/
王 王 [wang2] /king/
";

    #[test]
    fn test_parses_entries() {
        let dict = CedictDictionary::from_cedict_str(SAMPLE).unwrap();

        assert_eq!(dict.len(), 7);
        assert_eq!(dict.longest_word(), 2);
        let entries = dict.lookup("世界");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pinyin, "shi4 jie4");
        assert_eq!(entries[0].definitions, vec!["world", "CL:個|个[ge4]"]);
    }

    #[test]
    fn test_lookup_by_either_script() {
        let dict = CedictDictionary::from_cedict_str(SAMPLE).unwrap();

        assert_eq!(dict.lookup("傳統")[0].simplified, "传统");
        assert_eq!(dict.lookup("传统")[0].traditional, "傳統");
        assert!(dict.contains_word("传统"));
        assert!(dict.lookup("不在").is_empty());
    }

    #[test]
    fn test_entries_keep_file_order() {
        let dict = CedictDictionary::from_cedict_str(SAMPLE).unwrap();
        let entries = dict.lookup("了");

        assert_eq!(entries[0].pinyin, "le5");
        assert_eq!(entries[1].pinyin, "liao3");
    }

    #[test]
    fn test_mandarin_reading_skips_surname_entries() {
        let dict = CedictDictionary::from_cedict_str(SAMPLE).unwrap();

        assert_eq!(dict.mandarin_reading('王').as_deref(), Some("wáng"));
        assert_eq!(dict.mandarin_reading('你'), None);
        assert_eq!(dict.mandarin_reading('了').as_deref(), Some("le"));
    }

    #[test]
    fn test_malformed_line_reports_number() {
        let err = CedictDictionary::from_cedict_str("# c\n好 好 hao3 /good/\n").unwrap_err();
        match err {
            LexiconError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cedict_ts.u8");
        std::fs::write(&path, SAMPLE).unwrap();

        let dict = CedictDictionary::from_path(&path).unwrap();
        assert!(!dict.is_empty());
        assert!(matches!(
            CedictDictionary::from_path(dir.path().join("missing.u8")),
            Err(LexiconError::Io { .. })
        ));
    }
}
