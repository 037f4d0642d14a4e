//! Vocab command: type/token ratio and hapax legomena.

use bookbot_core::StopwordList;
use bookbot_core::vocabulary::{VocabularyReport, vocabulary};
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use super::metrics::{self, MetricReport};
use super::{OutputArgs, RunContext};

/// Arguments for the `vocab` subcommand.
#[derive(Args, Debug)]
pub struct VocabArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,

    /// Stopword list to filter out [default: none]
    #[arg(long, value_enum)]
    pub stopwords: Option<StopwordList>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl MetricReport for VocabularyReport {
    const COMMAND: &'static str = "vocab";
    const TITLE: &'static str = "BOOKBOT (VOCAB)";
    const SECTION: &'static str = "METRICS";

    fn headers() -> &'static [&'static str] {
        &[
            "tokens",
            "types",
            "type_token_ratio",
            "hapax_legomena",
            "hapax_ratio",
            "dis_legomena",
            "dis_ratio",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.tokens.to_string(),
            self.types.to_string(),
            format!("{:.4}", self.type_token_ratio),
            self.hapax_legomena.to_string(),
            format!("{:.4}", self.hapax_ratio),
            self.dis_legomena.to_string(),
            format!("{:.4}", self.dis_ratio),
        ]
    }

    fn text_lines(&self) -> Vec<String> {
        vec![
            format!("Tokens: {}", self.tokens),
            format!("Types: {}", self.types),
            format!("Type-Token Ratio: {:.4}", self.type_token_ratio),
            format!(
                "Hapax Legomena: {} ({:.4})",
                self.hapax_legomena, self.hapax_ratio
            ),
            format!("Dis Legomena: {} ({:.4})", self.dis_legomena, self.dis_ratio),
        ]
    }
}

/// Measure vocabulary richness of every input file.
#[instrument(name = "cmd_vocab", skip_all, fields(paths = args.paths.len()))]
pub fn cmd_vocab(args: VocabArgs, ctx: RunContext<'_>) -> anyhow::Result<()> {
    let list = args.stopwords.or(ctx.config.stopwords).unwrap_or_default();
    debug!(stopwords = %list, "executing vocab command");

    let stopwords = list.words();
    metrics::run(ctx, &args.paths, &args.output, Some(list.as_str()), |text| {
        vocabulary(text, stopwords)
    })
}
