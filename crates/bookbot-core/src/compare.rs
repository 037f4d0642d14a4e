//! Side-by-side comparison of two files.
//!
//! Both files are counted with the same options, ranked, and cut to their
//! top N. The comparison rows cover the union of both top-N key sets, so a
//! key that is frequent in only one file still shows up with the other
//! file's (possibly zero) count next to it.

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::counts::{FrequencyMap, char_counts_stream, word_counts_stream};
use crate::error::AnalysisResult;
use crate::normalize::Normalization;
use crate::rank::{Order, RankKey, RankedItem, SortKey, rank, sort_items, top_n};
use crate::word_lists::StopwordList;

/// Row cap when no top-N bound is given.
pub const DEFAULT_ROW_CAP: usize = 20;

/// What two files are compared by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CompareKind {
    /// Character frequencies.
    #[default]
    Chars,
    /// Word frequencies.
    Words,
}

impl CompareKind {
    /// Name of the compared key: `char` or `word`.
    pub const fn key_label(self) -> &'static str {
        match self {
            Self::Chars => "char",
            Self::Words => "word",
        }
    }

    /// Returns `"chars"` or `"words"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chars => "chars",
            Self::Words => "words",
        }
    }
}

/// Options shared by both sides of a comparison.
#[derive(Debug, Clone, Copy)]
pub struct CompareOptions {
    /// What to count.
    pub kind: CompareKind,
    /// Skip non-alphabetic characters (chars only).
    pub letters_only: bool,
    /// Stopwords to skip (words only).
    pub stopwords: StopwordList,
    /// Per-line normalization.
    pub normalization: Normalization,
    /// Sort key for each side and for the rows.
    pub sort_key: SortKey,
    /// Sort direction.
    pub order: Order,
    /// Per-side top N, and the row cap.
    pub top: Option<usize>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            kind: CompareKind::default(),
            letters_only: false,
            stopwords: StopwordList::default(),
            normalization: Normalization::default(),
            sort_key: SortKey::default(),
            order: Order::default(),
            top: Some(10),
        }
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparedFile {
    /// The analyzed file.
    pub path: Utf8PathBuf,
    /// Whitespace word total.
    pub num_words: u64,
    /// Ranked items, cut to the top N.
    pub items: Vec<RankedItem>,
    /// Full counts keyed by display string.
    #[serde(skip)]
    pub counts: FrequencyMap<String>,
}

impl ComparedFile {
    /// Count for `key`, zero if absent.
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

/// One compared key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    /// Display form of the key.
    pub key: String,
    /// Count in the first file.
    pub left: u64,
    /// Count in the second file.
    pub right: u64,
    /// `left - right`.
    pub delta: i64,
}

/// Result of comparing two files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// The first file.
    pub left: ComparedFile,
    /// The second file.
    pub right: ComparedFile,
    /// Rows over the union of both top-N key sets.
    pub rows: Vec<ComparisonRow>,
}

/// Compare two files.
///
/// # Errors
///
/// Returns an error if either file cannot be opened or read.
#[tracing::instrument(skip(options), fields(kind = options.kind.as_str()))]
pub fn compare(
    left: &Utf8Path,
    right: &Utf8Path,
    options: &CompareOptions,
) -> AnalysisResult<Comparison> {
    let left = analyze_side(left, options)?;
    let right = analyze_side(right, options)?;
    let rows = build_rows(&left, &right, options);
    Ok(Comparison { left, right, rows })
}

/// Count one file and rank it.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn analyze_side(path: &Utf8Path, options: &CompareOptions) -> AnalysisResult<ComparedFile> {
    let (num_words, (items, counts)) = match options.kind {
        CompareKind::Chars => {
            let tally = char_counts_stream(path, options.letters_only, options.normalization)?;
            (tally.num_words, side_items(&tally.counts, options))
        }
        CompareKind::Words => {
            let tally =
                word_counts_stream(path, options.stopwords.words(), options.normalization)?;
            (tally.num_words, side_items(&tally.counts, options))
        }
    };

    Ok(ComparedFile {
        path: path.to_path_buf(),
        num_words,
        items,
        counts,
    })
}

fn side_items<K: RankKey>(
    map: &FrequencyMap<K>,
    options: &CompareOptions,
) -> (Vec<RankedItem>, FrequencyMap<String>) {
    let items = top_n(rank(map, options.sort_key, options.order), options.top);
    let counts = map
        .iter()
        .map(|(key, &count)| (key.display_key(), count))
        .collect();
    (items, counts)
}

/// Build comparison rows from two analyzed sides.
///
/// Keys are taken from both top-N lists in first-seen order (left, then
/// right), sorted stably by combined count or by key, and capped at `top`
/// ([`DEFAULT_ROW_CAP`] when unset).
pub fn build_rows(
    left: &ComparedFile,
    right: &ComparedFile,
    options: &CompareOptions,
) -> Vec<ComparisonRow> {
    let mut seen = FxHashSet::default();
    let mut combined: Vec<RankedItem> = left
        .items
        .iter()
        .chain(&right.items)
        .filter(|item| seen.insert(item.key.as_str()))
        .map(|item| RankedItem {
            key: item.key.clone(),
            count: left.count(&item.key) + right.count(&item.key),
        })
        .collect();

    sort_items(&mut combined, options.sort_key, options.order);
    combined.truncate(options.top.unwrap_or(DEFAULT_ROW_CAP));

    combined
        .into_iter()
        .map(|item| {
            let l = left.count(&item.key);
            let r = right.count(&item.key);
            ComparisonRow {
                delta: l as i64 - r as i64,
                key: item.key,
                left: l,
                right: r,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn words_options(top: Option<usize>) -> CompareOptions {
        CompareOptions {
            kind: CompareKind::Words,
            top,
            ..CompareOptions::default()
        }
    }

    #[test]
    fn rows_cover_union_of_top_keys() {
        let tmp = TempDir::new().unwrap();
        let a = write_file(&tmp, "a.txt", "whale whale whale sea\n");
        let b = write_file(&tmp, "b.txt", "ship ship sea sea sea\n");

        // Union of {whale, sea} and {sea, ship}, capped at two rows.
        let cmp = compare(&a, &b, &words_options(Some(2))).unwrap();
        let keys: Vec<&str> = cmp.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["sea", "whale"]);

        let sea = &cmp.rows[0];
        assert_eq!((sea.left, sea.right, sea.delta), (1, 3, -2));
        let whale = &cmp.rows[1];
        assert_eq!((whale.left, whale.right, whale.delta), (3, 0, 3));
    }

    #[test]
    fn rows_sorted_by_combined_count() {
        let tmp = TempDir::new().unwrap();
        let a = write_file(&tmp, "a.txt", "ab ab cd\n");
        let b = write_file(&tmp, "b.txt", "cd cd cd ab\n");

        let cmp = compare(&a, &b, &words_options(None)).unwrap();
        assert_eq!(cmp.rows[0].key, "cd");
        assert_eq!(cmp.rows[0].left + cmp.rows[0].right, 4);
        assert_eq!(cmp.left.num_words, 3);
        assert_eq!(cmp.right.num_words, 4);
    }

    #[test]
    fn key_sort_ascending() {
        let tmp = TempDir::new().unwrap();
        let a = write_file(&tmp, "a.txt", "cab\n");
        let b = write_file(&tmp, "b.txt", "bad\n");
        let options = CompareOptions {
            sort_key: SortKey::Key,
            order: Order::Asc,
            top: None,
            ..CompareOptions::default()
        };

        let cmp = compare(&a, &b, &options).unwrap();
        let keys: Vec<&str> = cmp.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["\n", "a", "b", "c", "d"]);
    }

    #[test]
    fn unset_top_caps_rows() {
        let tmp = TempDir::new().unwrap();
        let text: String = ('a'..='z').map(|c| format!("{c}{c} ")).collect();
        let a = write_file(&tmp, "a.txt", &text);
        let b = write_file(&tmp, "b.txt", "zz\n");

        let cmp = compare(&a, &b, &words_options(None)).unwrap();
        assert_eq!(cmp.left.items.len(), 26);
        assert_eq!(cmp.rows.len(), DEFAULT_ROW_CAP);
    }

    #[test]
    fn missing_side_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let a = write_file(&tmp, "a.txt", "whale\n");
        let missing = Utf8PathBuf::try_from(tmp.path().join("nope.txt")).unwrap();
        assert!(compare(&a, &missing, &CompareOptions::default()).is_err());
        assert!(compare(&missing, &a, &CompareOptions::default()).is_err());
    }
}
