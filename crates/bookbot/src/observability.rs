//! Logging and tracing setup.
//!
//! Human-readable events go to stderr. When a log file or directory is
//! configured, the same events are also written as JSON lines through a
//! non-blocking appender; keep the returned guard alive until exit so the
//! file is flushed.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Explicit log file path.
const ENV_LOG_PATH: &str = "BOOKBOT_LOG_PATH";
/// Log directory; the file inside it is [`LOG_FILE_NAME`].
const ENV_LOG_DIR: &str = "BOOKBOT_LOG_DIR";
/// File name used inside a log directory.
const LOG_FILE_NAME: &str = "bookbot.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact file to append JSON lines to.
    pub log_path: Option<PathBuf>,
    /// Directory to write [`LOG_FILE_NAME`] into.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the log environment variables, letting `log_dir` from the
    /// configuration take precedence over `BOOKBOT_LOG_DIR`.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        let from_env = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            log_path: from_env(ENV_LOG_PATH),
            log_dir: log_dir.or_else(|| from_env(ENV_LOG_DIR)),
        }
    }

    /// Directory and file name of the log file, if file logging is on.
    fn target(&self) -> Option<(PathBuf, String)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name = path
                .file_name()
                .map_or_else(|| LOG_FILE_NAME.to_string(), |n| n.to_string_lossy().into_owned());
            return Some((dir, name));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), LOG_FILE_NAME.to_string()))
    }
}

/// Keeps the file appender running. Drop it last.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, `-v` debug,
/// `-vv` trace, and with neither the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when the log directory cannot be created or a subscriber is
/// already installed.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());

    let mut guard = None;
    let file_layer = match cfg.target() {
        Some((dir, name)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, name);
            let (writer, worker) = tracing_appender::non_blocking(appender);
            guard = Some(worker);
            Some(fmt::layer().json().with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(ObservabilityGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_override_wins_for_log_dir() {
        let cfg = ObservabilityConfig::from_env_with_overrides(Some(PathBuf::from("/tmp/bb")));
        assert_eq!(cfg.log_dir.as_deref(), Some(Path::new("/tmp/bb")));
    }

    #[test]
    fn log_path_splits_into_dir_and_name() {
        let cfg = ObservabilityConfig {
            log_path: Some(PathBuf::from("/var/log/bookbot/run.jsonl")),
            log_dir: Some(PathBuf::from("/ignored")),
        };
        let (dir, name) = cfg.target().unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/bookbot"));
        assert_eq!(name, "run.jsonl");
    }

    #[test]
    fn bare_file_name_logs_to_cwd() {
        let cfg = ObservabilityConfig {
            log_path: Some(PathBuf::from("run.jsonl")),
            log_dir: None,
        };
        let (dir, _) = cfg.target().unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }

    #[test]
    fn no_target_without_settings() {
        assert!(ObservabilityConfig::default().target().is_none());
    }
}
