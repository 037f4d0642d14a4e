//! Library interface for the `bookbot` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - [`render`] - Table and histogram rendering
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions via `xtask`.

pub mod commands;
pub mod render;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, bookbot_core=trace)
    BOOKBOT_LOG_PATH       Explicit JSONL log file path
    BOOKBOT_LOG_DIR        JSONL log directory
    BOOKBOT_<KEY>          Override any config key (e.g., BOOKBOT_TOP=20)
";
/// Command-line interface definition for bookbot.
#[derive(Parser)]
#[command(name = "bookbot")]
#[command(about = "Character, word, and n-gram statistics for text files", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Minimal output: no banners, no per-file error lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (shortcut for --format json)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Character frequency analysis
    Chars(commands::chars::CharsArgs),

    /// Word frequency analysis
    Words(commands::words::WordsArgs),

    /// N-gram frequency analysis (bigrams/trigrams)
    Ngrams(commands::ngrams::NgramsArgs),

    /// Compare character or word frequencies of two files
    Compare(commands::compare::CompareArgs),

    /// Flesch reading ease and Flesch-Kincaid grade
    Readability(commands::readability::ReadabilityArgs),

    /// Vocabulary richness (type/token ratio, hapax legomena)
    Vocab(commands::vocab::VocabArgs),

    /// Character category breakdown
    Categories(commands::categories::CategoriesArgs),

    /// Show package information
    Info(commands::info::InfoArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
