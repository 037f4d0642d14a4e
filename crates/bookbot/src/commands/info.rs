//! Info command: the settings an analysis would run with.

use bookbot_core::config::{Config, ConfigSources};
use camino::Utf8Path;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

/// Effective analysis defaults after every config layer is merged.
#[derive(Debug, Serialize)]
struct Settings<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<&'a Utf8Path>,
    sources: Vec<&'a Utf8Path>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<&'a Utf8Path>,
    jobs: usize,
    normalize: &'static str,
    ascii_only: bool,
    stopwords: &'static str,
    top: Option<usize>,
    format: &'static str,
    histogram_width: usize,
}

impl<'a> Settings<'a> {
    fn resolve(config: &'a Config, sources: &'a ConfigSources) -> Self {
        let files = sources
            .user_file
            .iter()
            .chain(&sources.project_files)
            .chain(&sources.explicit_files)
            .map(|p| p.as_path())
            .collect();
        Self {
            config_file: sources.primary_file(),
            sources: files,
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_deref(),
            jobs: config.jobs.unwrap_or(1).max(1),
            normalize: config.normalize.unwrap_or_default().as_str(),
            ascii_only: config.ascii_only,
            stopwords: config.stopwords.unwrap_or_default().as_str(),
            top: config.top,
            format: config.format.unwrap_or_default().as_str(),
            histogram_width: config.histogram_width,
        }
    }

    /// `(label, value)` pairs for the text view.
    fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Jobs", self.jobs.to_string()),
            ("Normalize", self.normalize.to_string()),
            ("ASCII only", self.ascii_only.to_string()),
            ("Stopwords", self.stopwords.to_string()),
            ("Top", self.top.map_or_else(|| "all".to_string(), |n| n.to_string())),
            ("Format", self.format.to_string()),
            ("Histogram width", self.histogram_width.to_string()),
            ("Log level", self.log_level.to_string()),
        ]
    }
}

#[derive(Serialize)]
struct InfoReport<'a> {
    name: &'static str,
    version: &'static str,
    config: Settings<'a>,
}

/// Print the version and the effective analysis settings.
#[instrument(name = "cmd_info", skip_all, fields(json_output = global_json))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let report = InfoReport {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        config: Settings::resolve(config, sources),
    };
    debug!(sources = report.config.sources.len(), "executing info command");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", report.name.bold(), report.version.green());
    println!();
    println!("{}", "Configuration".bold().underline());
    if report.config.sources.is_empty() {
        println!("{}: {}", "Files".dimmed(), "none loaded".yellow());
    }
    for path in &report.config.sources {
        println!("{}: {}", "File".dimmed(), path.cyan());
    }
    if let Some(dir) = report.config.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Analysis Defaults".bold().underline());
    for (label, value) in report.config.lines() {
        println!("{}: {}", label.dimmed(), value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookbot_core::{NormalizationForm, OutputFormat, StopwordList};
    use camino::Utf8PathBuf;

    #[test]
    fn defaults_resolve_to_effective_values() {
        let config = Config::default();
        let sources = ConfigSources::default();
        let settings = Settings::resolve(&config, &sources);

        assert!(settings.config_file.is_none());
        assert!(settings.sources.is_empty());
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.jobs, 1);
        assert_eq!(settings.stopwords, "none");
        assert_eq!(settings.format, "text");
        assert_eq!(settings.histogram_width, 50);
        assert!(settings.lines().contains(&("Top", "all".to_string())));
    }

    #[test]
    fn sources_are_listed_in_merge_order() {
        let config = Config {
            jobs: Some(4),
            top: Some(5),
            stopwords: Some(StopwordList::English),
            normalize: Some(NormalizationForm::Nfkc),
            format: Some(OutputFormat::Md),
            ..Config::default()
        };
        let sources = ConfigSources {
            project_files: vec![Utf8PathBuf::from("/p/.bookbot.toml")],
            user_file: Some(Utf8PathBuf::from("/home/u/.config/bookbot/config.toml")),
            explicit_files: vec![Utf8PathBuf::from("override.toml")],
        };
        let value = serde_json::to_value(Settings::resolve(&config, &sources)).unwrap();

        assert_eq!(value["config_file"], "override.toml");
        assert_eq!(
            value["sources"],
            serde_json::json!([
                "/home/u/.config/bookbot/config.toml",
                "/p/.bookbot.toml",
                "override.toml"
            ])
        );
        assert_eq!(value["jobs"], 4);
        assert_eq!(value["top"], 5);
        assert_eq!(value["normalize"], "NFKC");
        assert_eq!(value["format"], "md");
    }

    #[test]
    fn text_and_json_views_succeed() {
        let config = Config::default();
        let sources = ConfigSources::default();
        assert!(cmd_info(InfoArgs::default(), false, &config, &sources).is_ok());
        assert!(cmd_info(InfoArgs::default(), true, &config, &sources).is_ok());
    }
}
