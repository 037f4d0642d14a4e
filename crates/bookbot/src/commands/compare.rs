//! Compare command: two files side by side.

use anyhow::Context;
use bookbot_core::compare::{CompareKind, CompareOptions, ComparedFile, Comparison, compare};
use bookbot_core::{AnalysisError, OutputFormat, StopwordList};
use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::{NormalizeArgs, OutputArgs, REPORT_VERSION, RunContext, SortArgs, emit, print_banner};
use crate::render::{Table, display_key};

/// Per-side top N when neither `--top` nor config sets one.
const DEFAULT_TOP: usize = 10;

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First file
    pub left: Utf8PathBuf,

    /// Second file
    pub right: Utf8PathBuf,

    /// Compare character or word frequencies
    #[arg(long = "type", value_enum, default_value_t)]
    pub kind: CompareKind,

    /// Count alphabetic characters only (chars)
    #[arg(long)]
    pub letters_only: bool,

    /// Stopword list to filter out (words) [default: none]
    #[arg(long, value_enum)]
    pub stopwords: Option<StopwordList>,

    #[command(flatten)]
    pub normalize: NormalizeArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Items taken from each file, and the row cap [default: 10]
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Serialize)]
struct ComparePayload {
    report_version: u32,
    command: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    sort: &'static str,
    order: &'static str,
    top: Option<usize>,
    files: Vec<Value>,
}

/// Compare the frequencies of two files.
///
/// Unlike the batch commands, a read error on either file is fatal.
#[instrument(name = "cmd_compare", skip_all, fields(left = %args.left, right = %args.right))]
pub fn cmd_compare(args: CompareArgs, ctx: RunContext<'_>) -> anyhow::Result<()> {
    let options = CompareOptions {
        kind: args.kind,
        letters_only: args.letters_only,
        stopwords: args.stopwords.or(ctx.config.stopwords).unwrap_or_default(),
        normalization: args.normalize.resolve(ctx.config),
        sort_key: args.sort.sort,
        order: args.sort.order(),
        top: Some(args.top.or(ctx.config.top).unwrap_or(DEFAULT_TOP)),
    };
    debug!(kind = options.kind.as_str(), top = ?options.top, "executing compare command");

    let comparison = match compare(&args.left, &args.right, &options) {
        Ok(comparison) => comparison,
        Err(err) => {
            if let AnalysisError::Io { ref path, ref source } = err {
                ctx.report_failure(path, &source.to_string());
            }
            return Err(err)
                .with_context(|| format!("failed to compare {} and {}", args.left, args.right));
        }
    };

    match ctx.format(args.output.format) {
        OutputFormat::Text => {
            if !ctx.quiet {
                print_banner(&format!(
                    "BOOKBOT (COMPARE {})",
                    options.kind.as_str().to_uppercase()
                ));
            }
            println!("{}", table(&comparison, options.kind).to_text());
        }
        OutputFormat::Json => {
            let payload = payload(&comparison, &options);
            emit(&serde_json::to_string_pretty(&payload)?, args.output.out.as_deref())?;
        }
        table_format => {
            let rendered = table(&comparison, options.kind).render(table_format)?;
            emit(&rendered, args.output.out.as_deref())?;
        }
    }
    Ok(())
}

fn table(comparison: &Comparison, kind: CompareKind) -> Table {
    let mut table = Table::new([
        kind.key_label().to_string(),
        comparison.left.path.to_string(),
        comparison.right.path.to_string(),
        "delta".to_string(),
    ]);
    for row in &comparison.rows {
        table.push([
            display_key(&row.key),
            row.left.to_string(),
            row.right.to_string(),
            row.delta.to_string(),
        ]);
    }
    table
}

fn payload(comparison: &Comparison, options: &CompareOptions) -> ComparePayload {
    let key = options.kind.key_label();
    let side = |file: &ComparedFile| {
        let items: Vec<Value> = file
            .items
            .iter()
            .map(|item| json!({ key: item.key, "num": item.count }))
            .collect();
        json!({ "path": file.path, "num_words": file.num_words, "items": items })
    };

    ComparePayload {
        report_version: REPORT_VERSION,
        command: "compare",
        kind: options.kind.as_str(),
        sort: options.sort_key.label(key),
        order: options.order.as_str(),
        top: options.top,
        files: vec![side(&comparison.left), side(&comparison.right)],
    }
}
