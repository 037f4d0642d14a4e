//! Shared runner for the `chars`, `words`, and `ngrams` commands.

use anyhow::bail;
use bookbot_core::{FileReport, MetricKind, OutputFormat, TaskOptions, TaskResult, run_batch};
use camino::Utf8PathBuf;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::{OutputArgs, REPORT_VERSION, RunContext, emit, input_files, progress_bar};
use crate::render::{Table, display_key, histogram};

/// A frequency command, ready to run.
#[derive(Debug)]
pub struct FrequencyRun<'a> {
    /// Paths from the command line.
    pub paths: &'a [Utf8PathBuf],
    /// Per-task options.
    pub options: TaskOptions,
    /// Worker count from `--jobs`.
    pub jobs: Option<usize>,
    /// Format and destination.
    pub output: &'a OutputArgs,
    /// Print a histogram after each text report.
    pub histogram: bool,
}

#[derive(Serialize)]
struct FrequencyPayload {
    report_version: u32,
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    letters_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stopwords: Option<&'static str>,
    sort: &'static str,
    order: &'static str,
    top: Option<usize>,
    files: Vec<Value>,
}

/// Analyze every input file and print the reports in input order.
///
/// # Errors
///
/// Fails when there are no input files, when the worker pool cannot start,
/// when output cannot be written, or when every file failed.
pub fn run(ctx: RunContext<'_>, run: FrequencyRun<'_>) -> anyhow::Result<()> {
    let files = input_files(run.paths)?;
    let format = ctx.format(run.output.format);
    let jobs = run.jobs.or(ctx.config.jobs).unwrap_or(1).max(1);
    debug!(files = files.len(), jobs, format = %format, "running frequency batch");

    let progress = progress_bar(ctx.quiet, files.len());
    let results = run_batch(&files, &run.options, jobs, |_| {
        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    })?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut reports = Vec::with_capacity(results.len());
    for result in &results {
        match result {
            TaskResult::Success(report) => {
                if format == OutputFormat::Text {
                    print_text(ctx, &run, report);
                }
                reports.push(report);
            }
            TaskResult::Failure { path, error } => ctx.report_failure(path, error),
        }
    }

    match format {
        OutputFormat::Text => {}
        OutputFormat::Json => {
            let payload = payload(&run.options, &reports);
            emit(&serde_json::to_string_pretty(&payload)?, run.output.out.as_deref())?;
        }
        table_format => {
            let table = table(run.options.metric, &reports);
            emit(&table.render(table_format)?, run.output.out.as_deref())?;
        }
    }

    info!(
        succeeded = reports.len(),
        failed = results.len() - reports.len(),
        "batch finished"
    );
    if reports.is_empty() {
        bail!("all {} input files failed", results.len());
    }
    Ok(())
}

fn print_text(ctx: RunContext<'_>, run: &FrequencyRun<'_>, report: &FileReport) {
    let metric = run.options.metric;
    match metric {
        MetricKind::Chars { .. } => {
            ctx.print_header("BOOKBOT", &report.path);
            print_word_total(report);
            println!("--------- CHARACTER COUNT -----------");
        }
        MetricKind::Words => {
            ctx.print_header("BOOKBOT (WORDS)", &report.path);
            print_word_total(report);
            println!("----------- WORD FREQUENCY -----------");
        }
        MetricKind::Ngrams { n } => {
            ctx.print_header(&format!("BOOKBOT (NGRAMS n={n})"), &report.path);
            println!("----------- NGRAM FREQUENCY -----------");
        }
    }

    for item in &report.items {
        println!("{}: {}", display_key(&item.key), item.count);
    }

    if run.histogram {
        let header = match metric {
            MetricKind::Chars { .. } => "--------- CHARACTER HISTOGRAM ---------",
            MetricKind::Words => "----------- WORD HISTOGRAM ------------",
            MetricKind::Ngrams { .. } => "----------- NGRAM HISTOGRAM -----------",
        };
        println!("\n{header}");
        let chart = histogram(&report.items, ctx.config.histogram_width);
        if !chart.is_empty() {
            println!("{chart}");
        }
    }

    if matches!(metric, MetricKind::Chars { .. }) && !ctx.quiet {
        println!("============= END =============");
    }
}

fn print_word_total(report: &FileReport) {
    println!("------------ WORD COUNT ------------");
    println!("Found {} total words", report.num_words.unwrap_or(0));
}

fn command_name(metric: MetricKind) -> &'static str {
    match metric {
        MetricKind::Chars { .. } => "chars",
        MetricKind::Words => "words",
        MetricKind::Ngrams { .. } => "ngrams",
    }
}

fn payload(options: &TaskOptions, reports: &[&FileReport]) -> FrequencyPayload {
    let metric = options.metric;
    let key = metric.key_label();
    let (n, letters_only, stopwords) = match metric {
        MetricKind::Chars { letters_only } => (None, Some(letters_only), None),
        MetricKind::Words => (None, None, Some(options.stopwords.as_str())),
        MetricKind::Ngrams { n } => (Some(n), None, Some(options.stopwords.as_str())),
    };

    let files = reports
        .iter()
        .map(|report| {
            let items: Vec<Value> = report
                .items
                .iter()
                .map(|item| json!({ key: item.key, "num": item.count }))
                .collect();
            match metric {
                MetricKind::Ngrams { n } => {
                    json!({ "path": report.path, "n": n, "items": items })
                }
                _ => json!({
                    "path": report.path,
                    "num_words": report.num_words.unwrap_or(0),
                    "items": items,
                }),
            }
        })
        .collect();

    FrequencyPayload {
        report_version: REPORT_VERSION,
        command: command_name(metric),
        n,
        letters_only,
        stopwords,
        sort: options.sort_key.label(key),
        order: options.order.as_str(),
        top: options.top,
        files,
    }
}

fn table(metric: MetricKind, reports: &[&FileReport]) -> Table {
    let key_header = match metric {
        MetricKind::Ngrams { n } => format!("{n}-gram"),
        other => other.key_label().to_string(),
    };
    let mut table = Table::new(["path".to_string(), key_header, "count".to_string()]);
    for report in reports {
        for item in &report.items {
            table.push([
                report.path.to_string(),
                item.key.clone(),
                item.count.to_string(),
            ]);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookbot_core::{RankedItem, SortKey, StopwordList};

    fn report(path: &str, items: &[(&str, u64)]) -> FileReport {
        FileReport {
            path: Utf8PathBuf::from(path),
            num_words: Some(4),
            n: None,
            items: items
                .iter()
                .map(|&(key, count)| RankedItem {
                    key: key.to_string(),
                    count,
                })
                .collect(),
            top: None,
        }
    }

    #[test]
    fn chars_payload_shape() {
        let options = TaskOptions::new(MetricKind::Chars { letters_only: true });
        let r = report("a.txt", &[("l", 3), ("o", 2)]);
        let value = serde_json::to_value(payload(&options, &[&r])).unwrap();

        assert_eq!(value["report_version"], 1);
        assert_eq!(value["command"], "chars");
        assert_eq!(value["letters_only"], true);
        assert_eq!(value["sort"], "count");
        assert_eq!(value["order"], "desc");
        assert!(value["top"].is_null());
        assert!(value.get("stopwords").is_none());
        assert_eq!(value["files"][0]["num_words"], 4);
        assert_eq!(value["files"][0]["items"][0], json!({"char": "l", "num": 3}));
    }

    #[test]
    fn ngram_payload_names_key_sort() {
        let mut options = TaskOptions::new(MetricKind::Ngrams { n: 2 });
        options.sort_key = SortKey::Key;
        options.stopwords = StopwordList::English;
        let r = report("a.txt", &[("call me", 1)]);
        let value = serde_json::to_value(payload(&options, &[&r])).unwrap();

        assert_eq!(value["n"], 2);
        assert_eq!(value["sort"], "ngram");
        assert_eq!(value["stopwords"], "english");
        assert_eq!(value["files"][0]["n"], 2);
        assert!(value["files"][0].get("num_words").is_none());
        assert_eq!(value["files"][0]["items"][0]["ngram"], "call me");
    }

    #[test]
    fn table_has_one_row_per_item() {
        let a = report("a.txt", &[("whale", 3)]);
        let b = report("b.txt", &[("sea", 2), ("ship", 1)]);
        let table = table(MetricKind::Words, &[&a, &b]);
        assert_eq!(table.headers, vec!["path", "word", "count"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2], vec!["b.txt", "ship", "1"]);
    }

    #[test]
    fn ngram_table_header_names_size() {
        let table = table(MetricKind::Ngrams { n: 3 }, &[]);
        assert_eq!(table.headers[1], "3-gram");
    }
}
