//! Per-file units of work.
//!
//! A task streams one file through the counting engine and ranks the result.
//! Tasks never fail outright: every read or processing error becomes a
//! [`TaskResult::Failure`] so that one bad file cannot abort a batch.

use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::counts::{FrequencyMap, char_counts_stream, ngram_counts_stream, word_counts_stream};
use crate::error::{AnalysisError, AnalysisResult};
use crate::normalize::Normalization;
use crate::rank::{Order, RankKey, RankedItem, SortKey, rank, top_n};
use crate::word_lists::StopwordList;

/// What a task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Characters, optionally letters only.
    Chars {
        /// Skip non-alphabetic characters.
        letters_only: bool,
    },
    /// Word tokens.
    Words,
    /// Windows of `n` tokens.
    Ngrams {
        /// Window size.
        n: usize,
    },
}

impl MetricKind {
    /// Name of the counted key in reports: `char`, `word`, or `ngram`.
    pub const fn key_label(self) -> &'static str {
        match self {
            Self::Chars { .. } => "char",
            Self::Words => "word",
            Self::Ngrams { .. } => "ngram",
        }
    }
}

/// Everything a task needs to know, fixed for the whole batch.
#[derive(Debug, Clone, Copy)]
pub struct TaskOptions {
    /// What to count.
    pub metric: MetricKind,
    /// How to sort the ranked list.
    pub sort_key: SortKey,
    /// Sort direction.
    pub order: Order,
    /// Keep only the first N items.
    pub top: Option<usize>,
    /// Per-line normalization.
    pub normalization: Normalization,
    /// Stopwords removed from words and n-grams.
    pub stopwords: StopwordList,
}

impl TaskOptions {
    /// Options for `metric` with default sorting and no filtering.
    pub fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            sort_key: SortKey::default(),
            order: Order::default(),
            top: None,
            normalization: Normalization::default(),
            stopwords: StopwordList::default(),
        }
    }
}

/// Successful analysis of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The analyzed file.
    pub path: Utf8PathBuf,
    /// Whitespace word total, for character and word tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_words: Option<u64>,
    /// N-gram size, for n-gram tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    /// Ranked items, already truncated to `top`.
    pub items: Vec<RankedItem>,
    /// The top-N bound that was applied.
    pub top: Option<usize>,
}

/// Outcome of one task. Exactly one per input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// The file was analyzed.
    Success(FileReport),
    /// The file could not be analyzed.
    Failure {
        /// The file that failed.
        path: Utf8PathBuf,
        /// Description of what went wrong.
        error: String,
    },
}

impl TaskResult {
    /// The file this result is about.
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Success(report) => &report.path,
            Self::Failure { path, .. } => path,
        }
    }

    /// Whether the file was analyzed.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Analyze one file. Errors are captured in the result.
#[tracing::instrument(skip(options), fields(metric = options.metric.key_label()))]
pub fn run_task(path: &Utf8Path, options: &TaskOptions) -> TaskResult {
    match analyze(path, options) {
        Ok(report) => TaskResult::Success(report),
        Err(e) => {
            debug!(%path, error = %e, "task failed");
            TaskResult::Failure {
                path: path.to_path_buf(),
                error: failure_message(&e),
            }
        }
    }
}

/// The message shown next to the path, without repeating the path.
fn failure_message(err: &AnalysisError) -> String {
    match err {
        AnalysisError::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

fn analyze(path: &Utf8Path, options: &TaskOptions) -> AnalysisResult<FileReport> {
    let stopwords = options.stopwords.words();
    let normalization = options.normalization;

    let (num_words, n, items) = match options.metric {
        MetricKind::Chars { letters_only } => {
            let tally = char_counts_stream(path, letters_only, normalization)?;
            (Some(tally.num_words), None, ranked(&tally.counts, options))
        }
        MetricKind::Words => {
            let tally = word_counts_stream(path, stopwords, normalization)?;
            (Some(tally.num_words), None, ranked(&tally.counts, options))
        }
        MetricKind::Ngrams { n } => {
            let counts = ngram_counts_stream(path, n, stopwords, normalization)?;
            (None, Some(n), ranked(&counts, options))
        }
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        num_words,
        n,
        items,
        top: options.top,
    })
}

fn ranked<K: RankKey>(map: &FrequencyMap<K>, options: &TaskOptions) -> Vec<RankedItem> {
    top_n(rank(map, options.sort_key, options.order), options.top)
}

/// Analyze many files.
///
/// With `jobs > 1` and more than one path, tasks run on a dedicated pool of
/// at most one thread per path; otherwise they run one after another on the
/// caller's thread. Results follow the order of `paths` either way. `on_complete` is
/// called once per finished task, in completion order.
///
/// # Errors
///
/// Returns [`AnalysisError::WorkerPool`] if the thread pool cannot be built.
/// Per-file problems are reported as [`TaskResult::Failure`], not here.
#[tracing::instrument(skip(paths, options, on_complete), fields(files = paths.len()))]
pub fn run_batch<F>(
    paths: &[Utf8PathBuf],
    options: &TaskOptions,
    jobs: usize,
    on_complete: F,
) -> AnalysisResult<Vec<TaskResult>>
where
    F: Fn(&TaskResult) + Sync,
{
    let run_one = |path: &Utf8PathBuf| {
        let result = run_task(path, options);
        on_complete(&result);
        result
    };

    if jobs <= 1 || paths.len() <= 1 {
        return Ok(paths.iter().map(run_one).collect());
    }

    let workers = jobs.min(paths.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("bookbot-worker-{i}"))
        .build()
        .map_err(|e| AnalysisError::WorkerPool(e.to_string()))?;
    debug!(jobs, workers, "worker pool started");

    Ok(pool.install(|| paths.par_iter().map(run_one).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn success(result: &TaskResult) -> &FileReport {
        match result {
            TaskResult::Success(report) => report,
            TaskResult::Failure { path, error } => panic!("{path} failed: {error}"),
        }
    }

    #[test]
    fn chars_task_reports_word_total() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "a.txt", "Hello, world!\nHello hill.\n");
        let options = TaskOptions::new(MetricKind::Chars { letters_only: true });

        let result = run_task(&path, &options);
        let report = success(&result);
        assert_eq!(report.num_words, Some(4));
        assert_eq!(report.n, None);
        assert_eq!(report.items[0].key, "l");
        assert_eq!(report.items[0].count, 7);
    }

    #[test]
    fn words_task_applies_stopwords_and_top() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "a.txt", "the whale and the sea and the whale\n");
        let options = TaskOptions {
            stopwords: StopwordList::English,
            top: Some(1),
            ..TaskOptions::new(MetricKind::Words)
        };

        let result = run_task(&path, &options);
        let report = success(&result);
        assert_eq!(report.num_words, Some(8));
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].key, "whale");
        assert_eq!(report.items[0].count, 2);
    }

    #[test]
    fn ngram_task_bridges_lines() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "a.txt", "white whale\nwashed\n");
        let options = TaskOptions::new(MetricKind::Ngrams { n: 2 });

        let result = run_task(&path, &options);
        let report = success(&result);
        assert_eq!(report.n, Some(2));
        assert_eq!(report.num_words, None);
        assert!(report.items.iter().any(|i| i.key == "whale washed"));
    }

    #[test]
    fn missing_file_becomes_failure() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing.txt")).unwrap();
        let result = run_task(&path, &TaskOptions::new(MetricKind::Words));

        assert!(!result.is_success());
        assert_eq!(result.path(), path.as_path());
        match result {
            TaskResult::Failure { error, .. } => assert!(!error.contains("missing.txt")),
            TaskResult::Success(_) => panic!("expected failure"),
        }
    }

    fn batch_isolation(jobs: usize) {
        let tmp = TempDir::new().unwrap();
        let first = write_file(&tmp, "1.txt", "one fish\n");
        let missing = Utf8PathBuf::try_from(tmp.path().join("2.txt")).unwrap();
        let third = write_file(&tmp, "3.txt", "red fish blue fish\n");
        let paths = vec![first.clone(), missing.clone(), third.clone()];

        let completed = AtomicUsize::new(0);
        let results = run_batch(&paths, &TaskOptions::new(MetricKind::Words), jobs, |_| {
            completed.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        assert_eq!(completed.load(Ordering::SeqCst), 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results.iter().filter(|r| r.is_success()).count(), 2);
        assert_eq!(results[0].path(), first.as_path());
        assert_eq!(results[1].path(), missing.as_path());
        assert!(!results[1].is_success());
        assert_eq!(results[2].path(), third.as_path());
    }

    #[test]
    fn batch_isolates_failures_sequentially() {
        batch_isolation(1);
    }

    #[test]
    fn batch_isolates_failures_in_pool() {
        batch_isolation(4);
    }

    #[test]
    fn jobs_far_above_file_count_still_reports_every_file() {
        let tmp = TempDir::new().unwrap();
        let paths = vec![
            write_file(&tmp, "a.txt", "call me ishmael\n"),
            write_file(&tmp, "b.txt", "some years ago\n"),
        ];

        let results = run_batch(&paths, &TaskOptions::new(MetricKind::Words), 200_000, |_| {}).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(TaskResult::is_success));
        assert_eq!(results[1].path(), paths[1].as_path());
    }

    #[test]
    fn pool_and_sequential_agree() {
        let tmp = TempDir::new().unwrap();
        let paths: Vec<_> = (0..6)
            .map(|i| write_file(&tmp, &format!("{i}.txt"), &"call me ishmael ".repeat(i + 1)))
            .collect();
        let options = TaskOptions::new(MetricKind::Ngrams { n: 3 });

        let sequential = run_batch(&paths, &options, 1, |_| {}).unwrap();
        let pooled = run_batch(&paths, &options, 3, |_| {}).unwrap();
        assert_eq!(sequential, pooled);
    }
}
