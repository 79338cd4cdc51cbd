//! Word tokenization and the stop-word set shared by both rankers.

use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("word regex"));

/// Function words plus the boilerplate of regulatory prose.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "herein",
    "hereby", "hers", "him", "his", "how", "if", "in", "into", "is", "it", "its", "itself", "may",
    "me", "more", "most", "must", "my", "neither", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "out", "over", "own", "same", "shall", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there",
    "thereof", "therein", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "upon", "very", "was", "we", "were", "what", "when", "where", "whether",
    "which", "while", "who", "whom", "why", "will", "with", "within", "without", "would", "you",
    "your",
];

/// A lowercase word plus whether only whitespace separates it from the previous word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    pub joined: bool,
}

/// Split text into lowercase word tokens, dropping punctuation.
pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut prev_end: Option<usize> = None;

    for m in WORD_RE.find_iter(text) {
        let joined = prev_end.is_some_and(|end| text[end..m.start()].trim().is_empty());
        tokens.push(Token {
            text: m.as_str().to_lowercase(),
            joined,
        });
        prev_end = Some(m.end());
    }

    tokens
}

/// Whether a lowercase token carries content: at least two characters,
/// at least one letter, and not a stop word.
pub(crate) fn is_content_word(word: &str) -> bool {
    word.chars().nth(1).is_some()
        && word.chars().any(char::is_alphabetic)
        && !STOP_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_drops_punctuation() {
        let tokens = tokenize("The Agency's review, (final).");
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["the", "agency", "s", "review", "final"]);
    }

    #[test]
    fn tokenize_marks_punctuation_gaps() {
        let tokens = tokenize("loan program. Review board");
        let joined: Vec<bool> = tokens.iter().map(|t| t.joined).collect();
        assert_eq!(joined, vec![false, true, false, true]);
    }

    #[test]
    fn content_words_exclude_stop_words_numbers_and_single_letters() {
        assert!(is_content_word("agency"));
        assert!(is_content_word("8a"));
        assert!(!is_content_word("shall"));
        assert!(!is_content_word("30"));
        assert!(!is_content_word("s"));
    }
}
