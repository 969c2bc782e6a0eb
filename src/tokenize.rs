//! Word extraction and acronym detection.
//!
//! `parse_words` is a regex-equivalent word extractor: maximal runs of word
//! characters (Unicode alphanumerics), with an embedded straight or curly
//! apostrophe tolerated inside a run. Any other character, including `_`,
//! splits tokens.

const STRAIGHT_APOSTROPHE: char = '\'';
const CURLY_APOSTROPHE: char = '\u{2019}';

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

fn is_apostrophe(c: char) -> bool {
    c == STRAIGHT_APOSTROPHE || c == CURLY_APOSTROPHE
}

/// Extracts maximal runs of word characters from `text`, lowercasing first
/// unless `preserve_case` is set. An apostrophe embedded between two word
/// characters (`don't`, `O'Brien`) stays inside the token; a leading or
/// trailing apostrophe does not.
pub fn parse_words(text: &str, preserve_case: bool) -> Vec<String> {
    let lowered;
    let text = if preserve_case {
        text
    } else {
        lowered = text.to_lowercase();
        &lowered
    };

    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if is_word_char(c) {
            current.push(c);
            i += 1;
        } else if is_apostrophe(c)
            && !current.is_empty()
            && i + 1 < chars.len()
            && is_word_char(chars[i + 1])
        {
            current.push(c);
            i += 1;
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            i += 1;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// True iff `word` is entirely uppercase letters/digits, length >= 2 (no
/// lowercase letters anywhere): `[A-Z0-9]{2,}`.
pub fn is_acronym(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return false;
    }
    chars
        .iter()
        .all(|c| (c.is_ascii_uppercase() || c.is_ascii_digit()) && !c.is_lowercase())
}

/// True iff `word` is non-empty and consists entirely of ASCII digits.
pub fn is_numeric(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        let words = parse_words("this is a - test, (does it work)?", false);
        assert_eq!(words.len(), 7);
        assert_eq!(words[0], "this");
        assert_eq!(words[6], "work");
    }

    #[test]
    fn lowercases_by_default() {
        let words = parse_words("Hello World", false);
        assert_eq!(words, vec!["hello", "world"]);
    }

    #[test]
    fn preserves_case_when_requested() {
        let words = parse_words("Hello World", true);
        assert_eq!(words, vec!["Hello", "World"]);
    }

    #[test]
    fn keeps_embedded_apostrophe() {
        let words = parse_words("don't stop O'Brien's", true);
        assert_eq!(words, vec!["don't", "stop", "O'Brien's"]);
    }

    #[test]
    fn underscore_splits_tokens() {
        let words = parse_words("foo_bar baz", false);
        assert_eq!(words, vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn acronym_detection() {
        assert!(is_acronym("NASA"));
        assert!(is_acronym("A1"));
        assert!(!is_acronym("A"));
        assert!(!is_acronym("NASAx"));
        assert!(!is_acronym("nasa"));
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric("2024"));
        assert!(!is_numeric("2024x"));
        assert!(!is_numeric(""));
    }
}
