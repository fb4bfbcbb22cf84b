//! Dictionary driven word segmentation
//!
//! Finds the split with the fewest words where every multi-character word
//! is a dictionary headword. Ties prefer the longer leading word. Runs of
//! ASCII letters and digits are kept together as one word; everything else
//! not covered by the dictionary falls back to single characters.

use std::sync::Arc;

use super::cedict::CedictDictionary;

pub struct DictionarySegmenter {
    dictionary: Arc<CedictDictionary>,
    max_word_chars: usize,
}

impl DictionarySegmenter {
    pub fn new(dictionary: Arc<CedictDictionary>, max_word_chars: usize) -> Self {
        Self {
            dictionary,
            max_word_chars: max_word_chars.max(1),
        }
    }

    /// Candidate word lengths starting at `start`, longest first
    fn candidate_lengths(&self, chars: &[char], start: usize) -> Vec<usize> {
        if chars[start].is_ascii_alphanumeric() {
            let run = chars[start..]
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric())
                .count();
            return vec![run];
        }

        let longest = self
            .max_word_chars
            .min(self.dictionary.longest_word())
            .min(chars.len() - start);
        let mut lengths: Vec<usize> = (2..=longest)
            .rev()
            .filter(|&len| {
                let word = &chars[start..start + len];
                !word.iter().any(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
                    && self
                        .dictionary
                        .contains_word(&word.iter().collect::<String>())
            })
            .collect();
        lengths.push(1);
        lengths
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();

        // best[i]: fewest words covering chars[i..]
        let mut best = vec![usize::MAX; n + 1];
        let mut choice = vec![1usize; n + 1];
        best[n] = 0;
        for i in (0..n).rev() {
            for len in self.candidate_lengths(&chars, i) {
                let rest = best[i + len];
                if rest != usize::MAX && rest + 1 < best[i] {
                    best[i] = rest + 1;
                    choice[i] = len;
                }
            }
        }

        let mut words = Vec::with_capacity(best[0].min(n));
        let mut i = 0;
        while i < n {
            let len = choice[i];
            words.push(chars[i..i + len].iter().collect());
            i += len;
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter(dict: &str) -> DictionarySegmenter {
        let dict = CedictDictionary::from_cedict_str(dict).unwrap();
        DictionarySegmenter::new(Arc::new(dict), 8)
    }

    const DICT: &str = "\
你好 你好 [ni3 hao3] /hello/
世界 世界 [shi4 jie4] /world/
中華 中华 [Zhong1 hua2] /China/
中華人民共和國 中华人民共和国 [Zhong1 hua2 Ren2 min2 Gong4 he2 guo2] /People's Republic of China/
人民 人民 [ren2 min2] /the people/
共和國 共和国 [gong4 he2 guo2] /republic/
研究 研究 [yan2 jiu1] /research/
研究生 研究生 [yan2 jiu1 sheng1] /graduate student/
生命 生命 [sheng1 ming4] /life/
";

    #[test]
    fn test_segments_known_words() {
        assert_eq!(segmenter(DICT).segment("你好世界"), vec!["你好", "世界"]);
    }

    #[test]
    fn test_prefers_fewest_words() {
        assert_eq!(
            segmenter(DICT).segment("中华人民共和国"),
            vec!["中华人民共和国"]
        );
    }

    #[test]
    fn test_ties_prefer_longer_leading_word() {
        // 研究生|命 and 研究|生命 both take two words
        assert_eq!(segmenter(DICT).segment("研究生命"), vec!["研究生", "命"]);
    }

    #[test]
    fn test_unknown_characters_fall_back_to_singles() {
        assert_eq!(segmenter(DICT).segment("出口"), vec!["出", "口"]);
    }

    #[test]
    fn test_ascii_runs_stay_together() {
        assert_eq!(
            segmenter(DICT).segment("B2出口 ok"),
            vec!["B2", "出", "口", " ", "ok"]
        );
    }

    #[test]
    fn test_partition_reconcatenates() {
        let text = "你好，世界！abc 中华人民共和国万岁";
        let words = segmenter(DICT).segment(text);
        assert_eq!(words.concat(), text);
        assert!(words.iter().all(|w| !w.is_empty()));
    }

    #[test]
    fn test_empty_text() {
        assert!(segmenter(DICT).segment("").is_empty());
    }

    #[test]
    fn test_empty_dictionary() {
        assert_eq!(segmenter("").segment("你好"), vec!["你", "好"]);
    }
}
