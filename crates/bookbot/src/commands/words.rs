//! Words command: word frequencies.

use bookbot_core::{MetricKind, StopwordList, TaskOptions};
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use super::frequency::{self, FrequencyRun};
use super::{NormalizeArgs, OutputArgs, RunContext, SortArgs};

/// Arguments for the `words` subcommand.
#[derive(Args, Debug)]
pub struct WordsArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,

    /// Stopword list to filter out [default: none]
    #[arg(long, value_enum)]
    pub stopwords: Option<StopwordList>,

    #[command(flatten)]
    pub normalize: NormalizeArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Show only the N most frequent words
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Print an ASCII histogram after each report
    #[arg(long)]
    pub histogram: bool,

    /// Worker threads for multi-file runs
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Count words in every input file.
#[instrument(name = "cmd_words", skip_all, fields(paths = args.paths.len()))]
pub fn cmd_words(args: WordsArgs, ctx: RunContext<'_>) -> anyhow::Result<()> {
    let mut options = TaskOptions::new(MetricKind::Words);
    options.sort_key = args.sort.sort;
    options.order = args.sort.order();
    options.top = args.top.or(ctx.config.top);
    options.normalization = args.normalize.resolve(ctx.config);
    options.stopwords = args.stopwords.or(ctx.config.stopwords).unwrap_or_default();
    debug!(stopwords = %options.stopwords, top = ?options.top, "executing words command");

    frequency::run(
        ctx,
        FrequencyRun {
            paths: &args.paths,
            options,
            jobs: args.jobs,
            output: &args.output,
            histogram: args.histogram,
        },
    )
}
