//! Text processing utilities.
//!
//! Provides word tokenization and sentence splitting for the counting and
//! readability modules.

use regex::Regex;
use std::sync::LazyLock;

/// A word: ASCII letters, optionally joined to a second letter run by one
/// apostrophe ("don't", "ahab's"). Applied to case-folded text.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("valid regex"));

/// Sentence-ending punctuation followed by whitespace.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Word tokens of a piece of text.
///
/// Holds the case-folded text; [`Tokens::iter`] can be called any number of
/// times and each call walks the tokens lazily from the start.
#[derive(Debug, Clone)]
pub struct Tokens {
    folded: String,
}

impl Tokens {
    /// Iterate over the tokens.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        WORD_PATTERN
            .find_iter(&self.folded)
            .map(|m| m.as_str().trim_matches('\''))
            .filter(|token| !token.is_empty())
    }

    /// Number of tokens.
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a str;
    type IntoIter = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Tokenize text into lower-cased words.
///
/// Digits, punctuation, and non-ASCII letters never appear inside a token;
/// normalize with ASCII folding first if accented words should survive.
pub fn tokenize(text: &str) -> Tokens {
    Tokens {
        folded: text.to_lowercase(),
    }
}

/// Split text into sentences after `.`, `!`, or `?` followed by whitespace.
///
/// The text is trimmed first and empty pieces are dropped. Abbreviations and
/// decimals are not special-cased.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is one byte and stays with its sentence.
        let end = m.start() + 1;
        if end > start {
            sentences.push(&text[start..end]);
        }
        start = m.end();
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).iter().map(str::to_string).collect()
    }

    #[test]
    fn tokens_are_lowercased() {
        assert_eq!(words("Hello, World!"), vec!["hello", "world"]);
    }

    #[test]
    fn internal_apostrophe_kept() {
        assert_eq!(words("Don't touch Ahab's boat"), vec!["don't", "touch", "ahab's", "boat"]);
    }

    #[test]
    fn stray_apostrophes_dropped() {
        assert_eq!(words("'tis the sailors' song"), vec!["tis", "the", "sailors", "song"]);
    }

    #[test]
    fn only_one_apostrophe_joins() {
        assert_eq!(words("rock'n'roll"), vec!["rock'n", "roll"]);
    }

    #[test]
    fn digits_and_non_ascii_split_tokens() {
        assert_eq!(words("abc123def café"), vec!["abc", "def", "caf"]);
    }

    #[test]
    fn tokens_can_be_walked_twice() {
        let tokens = tokenize("one two three");
        assert_eq!(tokens.count(), 3);
        let collected: Vec<&str> = (&tokens).into_iter().collect();
        assert_eq!(collected, vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("42 -- !!").count(), 0);
    }

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("This is a sentence. This is another sentence.");
        assert_eq!(sentences, vec!["This is a sentence.", "This is another sentence."]);
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = split_sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn punctuation_without_whitespace_does_not_split() {
        assert_eq!(split_sentences("Version 3.14 shipped.").len(), 1);
    }

    #[test]
    fn newlines_count_as_whitespace() {
        assert_eq!(split_sentences("First line.\n\nSecond line!\n").len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }
}
