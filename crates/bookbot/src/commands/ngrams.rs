//! Ngrams command: bigram and trigram frequencies.

use bookbot_core::{MetricKind, StopwordList, TaskOptions};
use camino::Utf8PathBuf;
use clap::Args;
use clap::builder::RangedU64ValueParser;
use tracing::{debug, instrument};

use super::frequency::{self, FrequencyRun};
use super::{NormalizeArgs, OutputArgs, RunContext, SortArgs};

/// Arguments for the `ngrams` subcommand.
#[derive(Args, Debug)]
pub struct NgramsArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,

    /// Tokens per n-gram (2 or 3)
    #[arg(long, default_value_t = 2, value_parser = RangedU64ValueParser::<usize>::new().range(2..=3))]
    pub n: usize,

    /// Stopword list to filter out before windowing [default: none]
    #[arg(long, value_enum)]
    pub stopwords: Option<StopwordList>,

    #[command(flatten)]
    pub normalize: NormalizeArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Show only the N most frequent n-grams
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

/// Count n-grams in every input file.
#[instrument(name = "cmd_ngrams", skip_all, fields(paths = args.paths.len(), n = args.n))]
pub fn cmd_ngrams(args: NgramsArgs, ctx: RunContext<'_>) -> anyhow::Result<()> {
    let mut options = TaskOptions::new(MetricKind::Ngrams { n: args.n });
    options.sort_key = args.sort.sort;
    options.order = args.sort.order();
    options.top = args.top.or(ctx.config.top);
    options.normalization = args.normalize.resolve(ctx.config);
    options.stopwords = args.stopwords.or(ctx.config.stopwords).unwrap_or_default();
    debug!(stopwords = %options.stopwords, top = ?options.top, "executing ngrams command");

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
