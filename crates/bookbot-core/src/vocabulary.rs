//! Vocabulary richness: type/token ratio and hapax counts.

use serde::{Deserialize, Serialize};

use crate::counts::word_counts;
use crate::word_lists::Stopwords;

/// Vocabulary richness of a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VocabularyReport {
    /// Word tokens counted.
    pub tokens: u64,
    /// Distinct tokens.
    pub types: usize,
    /// `types / tokens`, or 0 for empty text.
    pub type_token_ratio: f64,
    /// Types that occur exactly once.
    pub hapax_legomena: usize,
    /// `hapax_legomena / tokens`.
    pub hapax_ratio: f64,
    /// Types that occur exactly twice.
    pub dis_legomena: usize,
    /// `dis_legomena / tokens`.
    pub dis_ratio: f64,
}

/// Measure the vocabulary of `text`, optionally ignoring stopwords.
#[tracing::instrument(skip(text, stopwords), fields(text_len = text.len()))]
pub fn vocabulary(text: &str, stopwords: Option<&Stopwords>) -> VocabularyReport {
    let counts = word_counts(text, stopwords);
    let tokens: u64 = counts.values().sum();
    let types = counts.len();
    let hapax_legomena = counts.values().filter(|&&c| c == 1).count();
    let dis_legomena = counts.values().filter(|&&c| c == 2).count();

    let ratio = |part: usize| {
        if tokens == 0 {
            0.0
        } else {
            part as f64 / tokens as f64
        }
    };

    VocabularyReport {
        tokens,
        types,
        type_token_ratio: ratio(types),
        hapax_legomena,
        hapax_ratio: ratio(hapax_legomena),
        dis_legomena,
        dis_ratio: ratio(dis_legomena),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_lists::STOPWORDS_EN;

    #[test]
    fn scenario_counts() {
        let report = vocabulary("Hello, world! Hello book. Ahab's whale; white whale.", None);
        assert_eq!(report.tokens, 8);
        assert_eq!(report.types, 6);
        assert!(report.types as u64 <= report.tokens);
        // world, book, ahab's, white
        assert_eq!(report.hapax_legomena, 4);
        // hello, whale
        assert_eq!(report.dis_legomena, 2);
        assert!((report.type_token_ratio - 0.75).abs() < 1e-12);
        assert!((report.hapax_ratio - 0.5).abs() < 1e-12);
        assert!((report.dis_ratio - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_text_has_zero_ratios() {
        let report = vocabulary("", None);
        assert_eq!(report.tokens, 0);
        assert_eq!(report.types, 0);
        assert_eq!(report.type_token_ratio, 0.0);
        assert_eq!(report.hapax_ratio, 0.0);
        assert_eq!(report.dis_ratio, 0.0);
    }

    #[test]
    fn stopwords_shrink_the_vocabulary() {
        let text = "the whale and the sea";
        let all = vocabulary(text, None);
        let filtered = vocabulary(text, Some(&STOPWORDS_EN));
        assert_eq!(all.tokens, 5);
        assert_eq!(filtered.tokens, 2);
        assert_eq!(filtered.types, 2);
    }
}
