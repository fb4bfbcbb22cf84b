//! Numbered pinyin to tone-marked pinyin

const MARKS: [(char, [char; 4]); 12] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
    ('A', ['Ā', 'Á', 'Ǎ', 'À']),
    ('E', ['Ē', 'É', 'Ě', 'È']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ']),
];

fn apply_mark(vowel: char, tone: u32) -> char {
    MARKS
        .iter()
        .find(|(base, _)| *base == vowel)
        .map(|(_, marked)| marked[(tone - 1) as usize])
        .unwrap_or(vowel)
}

/// Index of the vowel carrying the tone mark
///
/// `a` or `e` always take it, `o` takes it in `ou`, otherwise the last vowel.
fn mark_position(lower: &[char]) -> Option<usize> {
    if let Some(i) = lower.iter().position(|&c| c == 'a' || c == 'e') {
        return Some(i);
    }
    if let Some(i) = lower.windows(2).position(|w| w == ['o', 'u']) {
        return Some(i);
    }
    lower.iter().rposition(|&c| matches!(c, 'i' | 'o' | 'u' | 'ü'))
}

/// Convert one CC-CEDICT syllable such as `lu:4` or `Zhong1` to `lǜ` / `Zhōng`
///
/// Neutral tones (`5`, `0` or no digit) come back without a mark. Tokens
/// that are not syllables (`,`, `·`, `xx`) pass through unchanged.
pub fn numbered_to_marked(syllable: &str) -> String {
    let syllable = syllable.trim();
    let (body, tone) = match syllable.chars().last().and_then(|c| c.to_digit(10)) {
        Some(tone) => (&syllable[..syllable.len() - 1], tone),
        None => (syllable, 5),
    };
    let body = body
        .replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü");

    if !(1..=4).contains(&tone) {
        return body;
    }

    let mut chars: Vec<char> = body.chars().collect();
    let lower: Vec<char> = body.to_lowercase().chars().collect();
    if lower.len() != chars.len() {
        return body;
    }
    match mark_position(&lower) {
        Some(i) => {
            chars[i] = apply_mark(chars[i], tone);
            chars.into_iter().collect()
        }
        None => body,
    }
}

/// Convert a space separated numbered reading (`ni3 hao3`) syllable by syllable
pub fn reading_to_marked(reading: &str) -> String {
    reading
        .split_whitespace()
        .map(numbered_to_marked)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_a_and_e_first() {
        assert_eq!(numbered_to_marked("hao3"), "hǎo");
        assert_eq!(numbered_to_marked("xue2"), "xué");
        assert_eq!(numbered_to_marked("mei2"), "méi");
    }

    #[test]
    fn test_marks_o_in_ou() {
        assert_eq!(numbered_to_marked("zhou1"), "zhōu");
        assert_eq!(numbered_to_marked("gou3"), "gǒu");
    }

    #[test]
    fn test_marks_last_vowel_otherwise() {
        assert_eq!(numbered_to_marked("gui4"), "guì");
        assert_eq!(numbered_to_marked("liu2"), "liú");
        assert_eq!(numbered_to_marked("xiong1"), "xiōng");
        assert_eq!(numbered_to_marked("ni3"), "nǐ");
    }

    #[test]
    fn test_umlaut_spellings() {
        assert_eq!(numbered_to_marked("lu:4"), "lǜ");
        assert_eq!(numbered_to_marked("nv3"), "nǚ");
        assert_eq!(numbered_to_marked("lu:e4"), "lüè");
    }

    #[test]
    fn test_neutral_and_non_syllables() {
        assert_eq!(numbered_to_marked("ma5"), "ma");
        assert_eq!(numbered_to_marked("de"), "de");
        assert_eq!(numbered_to_marked(","), ",");
        assert_eq!(numbered_to_marked("m2"), "m");
    }

    #[test]
    fn test_capitalized_syllable() {
        assert_eq!(numbered_to_marked("Bei3"), "Běi");
        assert_eq!(numbered_to_marked("An1"), "Ān");
    }

    #[test]
    fn test_reading_to_marked() {
        assert_eq!(reading_to_marked("ni3 hao3"), "nǐ hǎo");
    }
}
