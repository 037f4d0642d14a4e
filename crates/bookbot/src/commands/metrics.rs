//! Shared runner for the whole-text metric commands.
//!
//! `readability`, `vocab`, and `categories` read each file in full, compute
//! one report per file, and print it as a banner report, JSON, or a table.

use anyhow::bail;
use bookbot_core::OutputFormat;
use bookbot_core::corpus::read_text;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{debug, info};

use super::{OutputArgs, REPORT_VERSION, RunContext, emit, input_files};
use crate::render::Table;

/// A per-file metric report and its presentation.
pub trait MetricReport: Serialize {
    /// Command name in JSON payloads.
    const COMMAND: &'static str;
    /// Banner title, e.g. `BOOKBOT (VOCAB)`.
    const TITLE: &'static str;
    /// Section header printed above the values.
    const SECTION: &'static str;

    /// Table columns after `path`.
    fn headers() -> &'static [&'static str];

    /// Table cells, matching [`MetricReport::headers`].
    fn cells(&self) -> Vec<String>;

    /// `Label: value` lines for the text report.
    fn text_lines(&self) -> Vec<String>;
}

#[derive(Serialize)]
struct MetricFile<'a, R> {
    path: &'a Utf8Path,
    #[serde(flatten)]
    report: &'a R,
}

#[derive(Serialize)]
struct MetricPayload<'a, R> {
    report_version: u32,
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stopwords: Option<&'static str>,
    files: Vec<MetricFile<'a, R>>,
}

/// Compute `metric` for every input file and print the results.
///
/// `stopwords` is echoed in JSON output when the metric uses a list.
///
/// # Errors
///
/// Fails when there are no input files, when output cannot be written, or
/// when every file failed.
pub fn run<R, F>(
    ctx: RunContext<'_>,
    paths: &[Utf8PathBuf],
    output: &OutputArgs,
    stopwords: Option<&'static str>,
    metric: F,
) -> anyhow::Result<()>
where
    R: MetricReport,
    F: Fn(&str) -> R,
{
    let files = input_files(paths)?;
    let format = ctx.format(output.format);
    debug!(command = R::COMMAND, files = files.len(), format = %format, "running metric");

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let text = match read_text(path) {
            Ok(text) => text,
            Err(e) => {
                let message = match e {
                    bookbot_core::AnalysisError::Io { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                ctx.report_failure(path, &message);
                continue;
            }
        };
        let report = metric(&text);
        if format == OutputFormat::Text {
            print_text(ctx, path, &report);
        }
        reports.push((path, report));
    }

    match format {
        OutputFormat::Text => {}
        OutputFormat::Json => {
            let payload = MetricPayload {
                report_version: REPORT_VERSION,
                command: R::COMMAND,
                stopwords,
                files: reports
                    .iter()
                    .map(|(path, report)| MetricFile {
                        path: path.as_path(),
                        report,
                    })
                    .collect(),
            };
            emit(&serde_json::to_string_pretty(&payload)?, output.out.as_deref())?;
        }
        table_format => {
            let table = table(&reports);
            emit(&table.render(table_format)?, output.out.as_deref())?;
        }
    }

    info!(
        command = R::COMMAND,
        succeeded = reports.len(),
        failed = files.len() - reports.len(),
        "metric finished"
    );
    if reports.is_empty() {
        bail!("all {} input files failed", files.len());
    }
    Ok(())
}

fn print_text<R: MetricReport>(ctx: RunContext<'_>, path: &Utf8Path, report: &R) {
    ctx.print_header(R::TITLE, path);
    println!("----------- {} -----------", R::SECTION);
    for line in report.text_lines() {
        println!("{line}");
    }
}

fn table<R: MetricReport>(reports: &[(&Utf8PathBuf, R)]) -> Table {
    let headers = std::iter::once("path").chain(R::headers().iter().copied());
    let mut table = Table::new(headers);
    for (path, report) in reports {
        table.push(std::iter::once(path.to_string()).chain(report.cells()));
    }
    table
}
