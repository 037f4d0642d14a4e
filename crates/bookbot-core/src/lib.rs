//! Core library for bookbot.
//!
//! This crate provides the text statistics pipeline used by the `bookbot`
//! CLI: normalization, tokenization, line streaming, frequency counting,
//! ranking, and the per-file task runner, plus whole-text readability,
//! vocabulary, and character category metrics.
//!
//! # Modules
//!
//! - [`normalize`] - Unicode normalization and ASCII folding
//! - [`text`] - Word tokenization and sentence splitting
//! - [`stream`] - Line-by-line file reading
//! - [`counts`] - Character, word, and n-gram counters
//! - [`rank`] - Sorting and top-N selection
//! - [`task`] - Per-file tasks and multi-file batches
//! - [`readability`], [`vocabulary`], [`categories`] - Whole-text metrics
//! - [`compare`] - Two-file frequency comparison
//! - [`corpus`] - Input file discovery
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use bookbot_core::{MetricKind, TaskOptions, TaskResult, run_task};
//! use camino::Utf8Path;
//!
//! let options = TaskOptions::new(MetricKind::Words);
//! if let TaskResult::Success(report) = run_task(Utf8Path::new("moby.txt"), &options) {
//!     for item in &report.items {
//!         println!("{}: {}", item.key, item.count);
//!     }
//! }
//! ```
#![deny(unsafe_code)]

pub mod categories;
pub mod compare;
pub mod config;
pub mod corpus;
pub mod counts;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod readability;
pub mod stream;
pub mod task;
pub mod text;
pub mod vocabulary;
pub mod word_lists;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel, OutputFormat};
pub use counts::{FrequencyMap, Ngram};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use normalize::{Normalization, NormalizationForm, normalize};
pub use rank::{Order, RankedItem, SortKey, rank, top_n};
pub use stream::{LineStream, stream_lines};
pub use task::{FileReport, MetricKind, TaskOptions, TaskResult, run_batch, run_task};
pub use text::tokenize;
pub use word_lists::{StopwordList, Stopwords};
