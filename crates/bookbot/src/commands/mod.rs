//! Command implementations.

use std::io::IsTerminal;

use anyhow::{Context, bail};
use bookbot_core::corpus;
use bookbot_core::{Config, Normalization, NormalizationForm, Order, OutputFormat, SortKey};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use tracing::debug;

pub mod categories;
pub mod chars;
pub mod compare;
pub mod frequency;
pub mod info;
pub mod metrics;
pub mod ngrams;
pub mod readability;
pub mod vocab;
pub mod words;

/// Version stamped into every JSON report.
pub const REPORT_VERSION: u32 = 1;

/// Global flags and loaded configuration, shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    /// Global `--json` flag.
    pub json: bool,
    /// Global `--quiet` flag.
    pub quiet: bool,
    /// Merged configuration.
    pub config: &'a Config,
}

impl RunContext<'_> {
    /// Pick the output format: `--json`, then `--format`, then config.
    pub fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            requested.or(self.config.format).unwrap_or_default()
        }
    }

    /// Print the per-file error line, unless quiet.
    pub fn report_failure(&self, path: &Utf8Path, error: &str) {
        if !self.quiet {
            eprintln!("Error reading '{path}': {error}");
        }
    }

    /// Print a report banner, or a bare `-- PATH` marker when quiet.
    pub fn print_header(&self, title: &str, path: &Utf8Path) {
        if self.quiet {
            println!("-- {path}");
        } else {
            print_banner(title);
            println!("Analyzing book found at {path}...");
        }
    }
}

/// `--format` and `--out`.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Output format [default: text, or `format` from config]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write JSON and table output to FILE instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<Utf8PathBuf>,
}

/// `--normalize` and `--ascii-only`.
#[derive(Args, Debug, Default, Clone)]
pub struct NormalizeArgs {
    /// Unicode normalization applied to each line
    #[arg(long, value_enum, value_name = "FORM")]
    pub normalize: Option<NormalizationForm>,

    /// Fold accented letters to ASCII and drop everything else outside ASCII
    #[arg(long)]
    pub ascii_only: bool,
}

impl NormalizeArgs {
    /// Merge with configuration defaults.
    pub fn resolve(&self, config: &Config) -> Normalization {
        Normalization::new(
            self.normalize.or(config.normalize).unwrap_or_default(),
            self.ascii_only || config.ascii_only,
        )
    }
}

/// `--sort`, `--asc`, and `--desc`.
#[derive(Args, Debug, Default, Clone)]
pub struct SortArgs {
    /// Sort by count, or by the key itself (`char`, `word`, `ngram`)
    #[arg(long, value_enum, default_value_t)]
    pub sort: SortKey,

    /// Ascending order
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Descending order (default)
    #[arg(long)]
    pub desc: bool,
}

impl SortArgs {
    /// The requested direction; descending unless `--asc` was given.
    pub const fn order(&self) -> Order {
        if self.asc { Order::Asc } else { Order::Desc }
    }
}

/// Expand paths and directories into input files.
///
/// # Errors
///
/// Fails when nothing is left to analyze.
pub fn input_files(paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let files = corpus::collect_files(paths);
    if files.is_empty() {
        bail!("no files to analyze");
    }
    debug!(count = files.len(), "collected input files");
    Ok(files)
}

/// Write rendered output to `out`, or print it.
///
/// # Errors
///
/// Fails when the output file cannot be written.
pub fn emit(output: &str, out: Option<&Utf8Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let mut contents = output.to_string();
            if !contents.ends_with('\n') {
                contents.push('\n');
            }
            std::fs::write(path, contents).with_context(|| format!("failed to write {path}"))?;
            debug!(%path, "wrote report");
        }
        None => println!("{output}"),
    }
    Ok(())
}

/// `============ TITLE ============`, bold when color is on.
pub fn print_banner(title: &str) {
    let line = format!("============ {title} ============");
    println!("{}", line.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Progress bar for multi-file batches on an interactive stderr.
pub fn progress_bar(quiet: bool, len: usize) -> Option<ProgressBar> {
    if quiet || len <= 1 || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    Some(pb)
}
