//! Categories command: character category breakdown.

use bookbot_core::categories::{CategoryCounts, category_counts};
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use super::metrics::{self, MetricReport};
use super::{OutputArgs, RunContext};

/// Arguments for the `categories` subcommand.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl MetricReport for CategoryCounts {
    const COMMAND: &'static str = "categories";
    const TITLE: &'static str = "BOOKBOT (CATEGORIES)";
    const SECTION: &'static str = "COUNTS";

    fn headers() -> &'static [&'static str] {
        &[
            "uppercase",
            "lowercase",
            "digits",
            "punctuation",
            "whitespace",
            "other",
        ]
    }

    fn cells(&self) -> Vec<String> {
        [
            self.uppercase,
            self.lowercase,
            self.digits,
            self.punctuation,
            self.whitespace,
            self.other,
        ]
        .iter()
        .map(u64::to_string)
        .collect()
    }

    fn text_lines(&self) -> Vec<String> {
        vec![
            format!("Uppercase: {}", self.uppercase),
            format!("Lowercase: {}", self.lowercase),
            format!("Digits: {}", self.digits),
            format!("Punctuation: {}", self.punctuation),
            format!("Whitespace: {}", self.whitespace),
            format!("Other: {}", self.other),
        ]
    }
}

/// Break every input file down by character category.
#[instrument(name = "cmd_categories", skip_all, fields(paths = args.paths.len()))]
pub fn cmd_categories(args: CategoriesArgs, ctx: RunContext<'_>) -> anyhow::Result<()> {
    debug!("executing categories command");
    metrics::run(ctx, &args.paths, &args.output, None, category_counts)
}
