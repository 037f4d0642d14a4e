//! Readability command: Flesch reading ease and Flesch-Kincaid grade.

use bookbot_core::readability::{ReadabilityReport, readability};
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use super::metrics::{self, MetricReport};
use super::{OutputArgs, RunContext};

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl MetricReport for ReadabilityReport {
    const COMMAND: &'static str = "readability";
    const TITLE: &'static str = "BOOKBOT (READABILITY)";
    const SECTION: &'static str = "METRICS";

    fn headers() -> &'static [&'static str] {
        &[
            "sentences",
            "words",
            "syllables",
            "avg_sentence_length",
            "avg_syllables_per_word",
            "flesch_reading_ease",
            "flesch_kincaid_grade",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.num_sentences.to_string(),
            self.num_words.to_string(),
            self.num_syllables.to_string(),
            format!("{:.2}", self.avg_sentence_length),
            format!("{:.2}", self.avg_syllables_per_word),
            format!("{:.2}", self.flesch_reading_ease),
            format!("{:.2}", self.flesch_kincaid_grade),
        ]
    }

    fn text_lines(&self) -> Vec<String> {
        vec![
            format!("Sentences: {}", self.num_sentences),
            format!("Words: {}", self.num_words),
            format!("Syllables: {}", self.num_syllables),
            format!("Avg sentence length: {:.2}", self.avg_sentence_length),
            format!("Avg syllables/word: {:.2}", self.avg_syllables_per_word),
            format!("Flesch Reading Ease: {:.2}", self.flesch_reading_ease),
            format!("Flesch-Kincaid Grade: {:.2}", self.flesch_kincaid_grade),
        ]
    }
}

/// Score the readability of every input file.
#[instrument(name = "cmd_readability", skip_all, fields(paths = args.paths.len()))]
pub fn cmd_readability(args: ReadabilityArgs, ctx: RunContext<'_>) -> anyhow::Result<()> {
    debug!("executing readability command");
    metrics::run(ctx, &args.paths, &args.output, None, readability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_match_headers() {
        let report = readability("The cat sat. The dog ran.");
        assert_eq!(report.cells().len(), ReadabilityReport::headers().len());
        assert_eq!(report.cells()[0], "2");
    }

    #[test]
    fn text_lines_use_two_decimals() {
        let report = readability("The cat sat.");
        let lines = report.text_lines();
        assert_eq!(lines[0], "Sentences: 1");
        assert_eq!(lines[3], "Avg sentence length: 3.00");
    }
}
