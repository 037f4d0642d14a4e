//! Character category breakdown.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Any Unicode punctuation (general category `P*`).
static UNICODE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{P}$").expect("valid regex"));

/// Unicode decimal digits (`Nd`).
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{Nd}$").expect("valid regex"));

/// Digits that are not decimal (`Numeric_Type=Digit`): superscripts,
/// subscripts, circled and parenthesized forms, and a few script digits.
const NON_DECIMAL_DIGITS: &[(char, char)] = &[
    ('\u{00B2}', '\u{00B3}'),
    ('\u{00B9}', '\u{00B9}'),
    ('\u{1369}', '\u{1371}'),
    ('\u{19DA}', '\u{19DA}'),
    ('\u{2070}', '\u{2070}'),
    ('\u{2074}', '\u{2079}'),
    ('\u{2080}', '\u{2089}'),
    ('\u{2460}', '\u{2468}'),
    ('\u{2474}', '\u{247C}'),
    ('\u{2488}', '\u{2490}'),
    ('\u{24EA}', '\u{24EA}'),
    ('\u{24F5}', '\u{24FD}'),
    ('\u{24FF}', '\u{24FF}'),
    ('\u{2776}', '\u{277E}'),
    ('\u{2780}', '\u{2788}'),
    ('\u{278A}', '\u{2792}'),
    ('\u{10A40}', '\u{10A43}'),
    ('\u{10E60}', '\u{10E68}'),
    ('\u{11052}', '\u{1105A}'),
    ('\u{1E8C7}', '\u{1E8CF}'),
    ('\u{1F100}', '\u{1F10A}'),
    ('\u{1F10B}', '\u{1F10C}'),
];

/// The category a character falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Upper-case letters.
    Uppercase,
    /// Lower-case letters.
    Lowercase,
    /// Digits, decimal or not (`²`, `①`).
    Digit,
    /// Whitespace, including line breaks and the ASCII separators
    /// `\x1c`..=`\x1f`.
    Whitespace,
    /// Unicode or ASCII punctuation.
    Punctuation,
    /// Everything else: symbols, uncased letters, controls.
    Other,
}

impl Category {
    /// Classify one character. Checks run in declaration order and the
    /// first match wins, so every character has exactly one category.
    pub fn of(ch: char) -> Self {
        if ch.is_uppercase() {
            Self::Uppercase
        } else if ch.is_lowercase() {
            Self::Lowercase
        } else if ch.is_ascii_digit() || (!ch.is_ascii() && is_digit(ch)) {
            Self::Digit
        } else if ch.is_whitespace() || ('\x1c'..='\x1f').contains(&ch) {
            Self::Whitespace
        } else if is_punctuation(ch) {
            Self::Punctuation
        } else {
            Self::Other
        }
    }
}

fn is_digit(ch: char) -> bool {
    if NON_DECIMAL_DIGITS
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&ch))
    {
        return true;
    }
    let mut buf = [0u8; 4];
    DECIMAL.is_match(ch.encode_utf8(&mut buf))
}

fn is_punctuation(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_punctuation();
    }
    let mut buf = [0u8; 4];
    UNICODE_PUNCTUATION.is_match(ch.encode_utf8(&mut buf))
}

/// Character counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Upper-case letters.
    pub uppercase: u64,
    /// Lower-case letters.
    pub lowercase: u64,
    /// Digits.
    pub digits: u64,
    /// Punctuation.
    pub punctuation: u64,
    /// Whitespace.
    pub whitespace: u64,
    /// Everything else.
    pub other: u64,
}

impl CategoryCounts {
    /// Sum over all categories; equals the number of characters counted.
    pub const fn total(&self) -> u64 {
        self.uppercase + self.lowercase + self.digits + self.punctuation + self.whitespace + self.other
    }

    fn add(&mut self, category: Category) {
        let slot = match category {
            Category::Uppercase => &mut self.uppercase,
            Category::Lowercase => &mut self.lowercase,
            Category::Digit => &mut self.digits,
            Category::Whitespace => &mut self.whitespace,
            Category::Punctuation => &mut self.punctuation,
            Category::Other => &mut self.other,
        };
        *slot += 1;
    }
}

/// Count the characters of `text` by category.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn category_counts(text: &str) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for ch in text.chars() {
        counts.add(Category::of(ch));
    }
    counts
}
