//! Character, word, and n-gram frequency counting.
//!
//! Each metric has an incremental counter with a `feed` step and a `finish`
//! step. Whole-text counting feeds the entire text once; streaming feeds one
//! normalized line at a time from a [`LineStream`]. Both paths share the same
//! counter, so they only differ where a line boundary matters: n-grams that
//! span two lines are bridged by a lookback buffer.

use std::collections::VecDeque;

use camino::Utf8Path;
use rustc_hash::FxHashMap;

use crate::error::AnalysisResult;
use crate::normalize::Normalization;
use crate::stream::LineStream;
use crate::text::tokenize;
use crate::word_lists::Stopwords;

/// Key → count accumulation.
///
/// Uses a fixed hasher, so two maps built from the same input iterate in the
/// same order. Ranking relies on that for deterministic tie order.
pub type FrequencyMap<K> = FxHashMap<K, u64>;

/// An ordered tuple of n tokens.
pub type Ngram = Vec<String>;

fn is_stopword(stopwords: Option<&Stopwords>, token: &str) -> bool {
    stopwords.is_some_and(|set| set.contains(token))
}

/// Counts lower-cased characters.
#[derive(Debug, Clone, Default)]
pub struct CharCounter {
    letters_only: bool,
    counts: FrequencyMap<char>,
}

impl CharCounter {
    /// Create a counter; with `letters_only`, non-alphabetic characters are skipped.
    pub fn new(letters_only: bool) -> Self {
        Self {
            letters_only,
            counts: FrequencyMap::default(),
        }
    }

    /// Count every character of `chunk`.
    pub fn feed(&mut self, chunk: &str) {
        for ch in chunk.chars() {
            for lower in ch.to_lowercase() {
                if self.letters_only && !lower.is_alphabetic() {
                    continue;
                }
                *self.counts.entry(lower).or_insert(0) += 1;
            }
        }
    }

    /// Finish counting.
    pub fn finish(self) -> FrequencyMap<char> {
        self.counts
    }
}

/// Counts word tokens, optionally skipping stopwords.
#[derive(Debug, Clone, Default)]
pub struct WordCounter<'s> {
    stopwords: Option<&'s Stopwords>,
    counts: FrequencyMap<String>,
}

impl<'s> WordCounter<'s> {
    /// Create a counter. `None` counts every token.
    pub fn new(stopwords: Option<&'s Stopwords>) -> Self {
        Self {
            stopwords,
            counts: FrequencyMap::default(),
        }
    }

    /// Count the tokens of `chunk`.
    pub fn feed(&mut self, chunk: &str) {
        let tokens = tokenize(chunk);
        for token in tokens.iter() {
            if is_stopword(self.stopwords, token) {
                continue;
            }
            match self.counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(token.to_string(), 1);
                }
            }
        }
    }

    /// Finish counting.
    pub fn finish(self) -> FrequencyMap<String> {
        self.counts
    }
}

/// Sums whitespace-separated fields.
///
/// This is the raw "total words" figure. It is not filtered or tokenized, so
/// it usually differs from the sum of [`WordCounter`] counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTotal {
    total: u64,
}

impl WordTotal {
    /// Create a zeroed total.
    pub const fn new() -> Self {
        Self { total: 0 }
    }

    /// Add the fields of `chunk`.
    pub fn feed(&mut self, chunk: &str) {
        self.total += chunk.split_whitespace().count() as u64;
    }

    /// Finish counting.
    pub const fn finish(self) -> u64 {
        self.total
    }
}

/// Counts contiguous n-token windows, bridging chunk boundaries.
///
/// Between chunks the counter keeps a lookback buffer of at most `n - 1`
/// trailing tokens. When a chunk is fed, the buffer and the chunk's tokens
/// are joined, every complete window is counted, and the buffer becomes the
/// last `n - 1` tokens of the joined sequence. A joined sequence shorter than
/// `n - 1` leaves the buffer as it was, so a very short line following a
/// reset buffer does not carry into the next line.
#[derive(Debug, Clone)]
pub struct NgramCounter<'s> {
    n: usize,
    stopwords: Option<&'s Stopwords>,
    lookback: VecDeque<String>,
    counts: FrequencyMap<Ngram>,
}

impl<'s> NgramCounter<'s> {
    /// Create a counter for windows of `n` tokens. `n <= 1` counts nothing.
    pub fn new(n: usize, stopwords: Option<&'s Stopwords>) -> Self {
        Self {
            n,
            stopwords,
            lookback: VecDeque::with_capacity(n.saturating_sub(1)),
            counts: FrequencyMap::default(),
        }
    }

    /// Count the windows completed by `chunk`.
    pub fn feed(&mut self, chunk: &str) {
        if self.n <= 1 {
            return;
        }

        let tokens = tokenize(chunk);
        let fresh = tokens
            .iter()
            .filter(|token| !is_stopword(self.stopwords, token))
            .map(str::to_string);

        let mut joined: Vec<String> = self.lookback.iter().cloned().collect();
        joined.extend(fresh);
        if joined.is_empty() {
            return;
        }

        for window in joined.windows(self.n) {
            match self.counts.get_mut(window) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(window.to_vec(), 1);
                }
            }
        }

        let keep = self.n - 1;
        if joined.len() >= keep {
            self.lookback.clear();
            self.lookback.extend(joined.drain(joined.len() - keep..));
        }
    }

    /// Tokens currently carried over to the next chunk.
    pub fn lookback(&self) -> impl Iterator<Item = &str> {
        self.lookback.iter().map(String::as_str)
    }

    /// Finish counting.
    pub fn finish(self) -> FrequencyMap<Ngram> {
        self.counts
    }
}

/// Number of whitespace-separated fields in `text`.
pub fn word_total(text: &str) -> u64 {
    let mut total = WordTotal::new();
    total.feed(text);
    total.finish()
}

/// Character counts of `text`.
pub fn char_counts(text: &str, letters_only: bool) -> FrequencyMap<char> {
    let mut counter = CharCounter::new(letters_only);
    counter.feed(text);
    counter.finish()
}

/// Word counts of `text`, minus stopwords.
pub fn word_counts(text: &str, stopwords: Option<&Stopwords>) -> FrequencyMap<String> {
    let mut counter = WordCounter::new(stopwords);
    counter.feed(text);
    counter.finish()
}

/// N-gram counts of `text`, with stopwords removed before windowing.
pub fn ngram_counts(text: &str, n: usize, stopwords: Option<&Stopwords>) -> FrequencyMap<Ngram> {
    let mut counter = NgramCounter::new(n, stopwords);
    counter.feed(text);
    counter.finish()
}

/// Feed every line of `path` to `sink`.
fn for_each_line(
    path: &Utf8Path,
    normalization: Normalization,
    mut sink: impl FnMut(&str),
) -> AnalysisResult<()> {
    for line in LineStream::open(path, normalization)? {
        sink(&line?);
    }
    Ok(())
}

/// Counts from one streamed pass over a file, with its word total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamCounts<K: Eq + std::hash::Hash> {
    /// Whitespace word total.
    pub num_words: u64,
    /// Per-key counts.
    pub counts: FrequencyMap<K>,
}

/// Character counts and word total of a file, streamed.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or read.
#[tracing::instrument(skip(normalization))]
pub fn char_counts_stream(
    path: &Utf8Path,
    letters_only: bool,
    normalization: Normalization,
) -> AnalysisResult<StreamCounts<char>> {
    let mut total = WordTotal::new();
    let mut counter = CharCounter::new(letters_only);
    for_each_line(path, normalization, |line| {
        total.feed(line);
        counter.feed(line);
    })?;
    Ok(StreamCounts {
        num_words: total.finish(),
        counts: counter.finish(),
    })
}

/// Word counts and word total of a file, streamed.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or read.
#[tracing::instrument(skip(stopwords, normalization))]
pub fn word_counts_stream(
    path: &Utf8Path,
    stopwords: Option<&Stopwords>,
    normalization: Normalization,
) -> AnalysisResult<StreamCounts<String>> {
    let mut total = WordTotal::new();
    let mut counter = WordCounter::new(stopwords);
    for_each_line(path, normalization, |line| {
        total.feed(line);
        counter.feed(line);
    })?;
    Ok(StreamCounts {
        num_words: total.finish(),
        counts: counter.finish(),
    })
}

/// N-gram counts of a file, streamed line by line with cross-line bridging.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or read.
#[tracing::instrument(skip(stopwords, normalization))]
pub fn ngram_counts_stream(
    path: &Utf8Path,
    n: usize,
    stopwords: Option<&Stopwords>,
    normalization: Normalization,
) -> AnalysisResult<FrequencyMap<Ngram>> {
    let mut counter = NgramCounter::new(n, stopwords);
    for_each_line(path, normalization, |line| counter.feed(line))?;
    Ok(counter.finish())
}
