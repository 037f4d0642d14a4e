//! Readability scoring using Flesch Reading Ease and Flesch-Kincaid Grade Level.
//!
//! Formulas, with ASL = words/sentences and ASW = syllables/words:
//!
//! - Reading Ease: `206.835 - 1.015 * ASL - 84.6 * ASW` (higher = easier)
//! - Grade Level: `0.39 * ASL + 11.8 * ASW - 15.59`
//!
//! Sentence and word counts are floored at 1, so empty text scores instead
//! of failing.

use serde::{Deserialize, Serialize};

use crate::text;

/// Result of readability analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityReport {
    /// Number of sentences detected (at least 1).
    pub num_sentences: usize,
    /// Number of word tokens (at least 1).
    pub num_words: usize,
    /// Total syllable count.
    pub num_syllables: usize,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Syllables per word.
    pub avg_syllables_per_word: f64,
    /// Flesch Reading Ease score.
    pub flesch_reading_ease: f64,
    /// Flesch-Kincaid Grade Level.
    pub flesch_kincaid_grade: f64,
}

/// Score the readability of `text`.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn readability(text: &str) -> ReadabilityReport {
    let num_sentences = text::split_sentences(text).len().max(1);
    let tokens = text::tokenize(text);
    let num_words = tokens.count().max(1);
    let num_syllables: usize = tokens.iter().map(count_syllables).sum();

    let asl = num_words as f64 / num_sentences as f64;
    let asw = num_syllables as f64 / num_words as f64;
    let flesch_reading_ease = 1.015f64.mul_add(-asl, 84.6f64.mul_add(-asw, 206.835));
    let flesch_kincaid_grade = 0.39f64.mul_add(asl, 11.8 * asw) - 15.59;

    ReadabilityReport {
        num_sentences,
        num_words,
        num_syllables,
        avg_sentence_length: asl,
        avg_syllables_per_word: asw,
        flesch_reading_ease,
        flesch_kincaid_grade,
    }
}

/// Estimate syllables in a word by counting vowel groups.
///
/// Non-letters are removed first. A trailing "e" is treated as silent when
/// the word has more than one group. Every word with letters has at least
/// one syllable.
pub fn count_syllables(word: &str) -> usize {
    let cleaned: String = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for ch in cleaned.chars() {
        let is_vowel = matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = is_vowel;
    }

    if cleaned.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn basic_readability() {
        let report = readability("The cat sat on the mat. The dog ran fast.");
        assert_eq!(report.num_sentences, 2);
        assert_eq!(report.num_words, 10);
        assert_eq!(report.num_syllables, 10);
        assert!(close(report.avg_sentence_length, 5.0));
        assert!(close(report.avg_syllables_per_word, 1.0));
        assert!(close(report.flesch_reading_ease, 206.835 - 1.015 * 5.0 - 84.6));
        assert!(close(report.flesch_kincaid_grade, 0.39 * 5.0 + 11.8 - 15.59));
    }

    #[test]
    fn scenario_sentence_count() {
        let report = readability("Hello, world! Hello book. Ahab's whale; white whale.");
        assert_eq!(report.num_sentences, 3);
        assert_eq!(report.num_words, 8);
    }

    #[test]
    fn complex_text_scores_harder() {
        let simple = readability("The cat sat on the mat. The dog ran fast.");
        let complex = readability(
            "The implementation of the comprehensive organizational restructuring \
             initiative necessitated the establishment of interdepartmental \
             communication protocols.",
        );
        assert!(complex.flesch_kincaid_grade > simple.flesch_kincaid_grade);
        assert!(complex.flesch_reading_ease < simple.flesch_reading_ease);
    }

    #[test]
    fn empty_text_is_floored() {
        let report = readability("");
        assert_eq!(report.num_sentences, 1);
        assert_eq!(report.num_words, 1);
        assert_eq!(report.num_syllables, 0);
        assert!(report.flesch_reading_ease.is_finite());
        assert!(report.flesch_kincaid_grade.is_finite());
    }

    #[test]
    fn syllable_heuristic() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("table"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("ahab's"), 2);
        assert_eq!(count_syllables("queue"), 1);
        assert_eq!(count_syllables("123"), 0);
    }

    #[test]
    fn report_serializes_flat_keys() {
        let json = serde_json::to_value(readability("One. Two.")).unwrap();
        for key in [
            "num_sentences",
            "num_words",
            "num_syllables",
            "avg_sentence_length",
            "avg_syllables_per_word",
            "flesch_reading_ease",
            "flesch_kincaid_grade",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
