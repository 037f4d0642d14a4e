//! Chars command: character frequencies and word totals.

use bookbot_core::{MetricKind, TaskOptions};
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use super::frequency::{self, FrequencyRun};
use super::{NormalizeArgs, OutputArgs, RunContext, SortArgs};

/// Arguments for the `chars` subcommand.
#[derive(Args, Debug)]
pub struct CharsArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,

    /// Count alphabetic characters only
    #[arg(long)]
    pub letters_only: bool,

    #[command(flatten)]
    pub normalize: NormalizeArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Show only the N most frequent characters
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

/// Count characters in every input file.
#[instrument(name = "cmd_chars", skip_all, fields(paths = args.paths.len()))]
pub fn cmd_chars(args: CharsArgs, ctx: RunContext<'_>) -> anyhow::Result<()> {
    debug!(letters_only = args.letters_only, top = ?args.top, "executing chars command");

    let mut options = TaskOptions::new(MetricKind::Chars {
        letters_only: args.letters_only,
    });
    options.sort_key = args.sort.sort;
    options.order = args.sort.order();
    options.top = args.top.or(ctx.config.top);
    options.normalization = args.normalize.resolve(ctx.config);

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
