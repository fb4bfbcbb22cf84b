//! Character to jyutping table
//!
//! TSV format: `字<TAB>zi6`, optionally followed by more columns. When a
//! character appears on several lines the first one wins. Multi-character
//! rows are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::LexiconError;

#[derive(Debug, Default)]
pub struct JyutpingTable {
    map: HashMap<char, String>,
}

impl JyutpingTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tsv_str(&s)
    }

    pub fn from_tsv_str(s: &str) -> Result<Self, LexiconError> {
        let mut map = HashMap::new();
        let mut skipped = 0usize;

        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.split('\t');
            let text = it.next().unwrap_or("").trim();
            let reading = it.next().unwrap_or("").trim();
            if text.is_empty() || reading.is_empty() {
                return Err(LexiconError::Malformed {
                    line: idx + 1,
                    reason: "missing character or reading".to_string(),
                });
            }

            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    // Rows may list alternatives separated by spaces or commas
                    let first = reading
                        .split(|c: char| c == ' ' || c == ',')
                        .find(|r| !r.is_empty())
                        .unwrap_or(reading);
                    map.entry(ch).or_insert_with(|| first.to_string());
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} multi-character jyutping rows", skipped);
        }
        Ok(Self { map })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn reading(&self, ch: char) -> Option<&str> {
        self.map.get(&ch).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reading_wins() {
        let table = JyutpingTable::from_tsv_str(
            "# char\tjyutping\n你\tnei5\n好\thou2 hou3\n好\thou3\n行\thang4,hong4\n",
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.reading('你'), Some("nei5"));
        assert_eq!(table.reading('好'), Some("hou2"));
        assert_eq!(table.reading('行'), Some("hang4"));
        assert_eq!(table.reading('界'), None);
    }

    #[test]
    fn test_multi_character_rows_are_ignored() {
        let table = JyutpingTable::from_tsv_str("你好\tnei5 hou2\n世\tsai3\n").unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.reading('世'), Some("sai3"));
    }

    #[test]
    fn test_missing_reading_is_an_error() {
        assert!(matches!(
            JyutpingTable::from_tsv_str("你\n"),
            Err(LexiconError::Malformed { line: 1, .. })
        ));
    }
}
