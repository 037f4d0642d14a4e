//! Build tasks for the bookbot workspace.
//!
//! Run with `cargo xtask <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace maintenance tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Render the bookbot man page
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,

        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => man(&out_dir),
        Task::Completions { shell, out_dir } => completions(shell, &out_dir),
    }
}

fn man(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let command = bookbot::command();
    let mut buffer = Vec::new();
    clap_mangen::Man::new(command.clone())
        .render(&mut buffer)
        .context("failed to render man page")?;
    let path = out_dir.join("bookbot.1");
    fs::write(&path, buffer).with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());

    for sub in command.get_subcommands() {
        let name = format!("bookbot-{}", sub.get_name());
        let mut buffer = Vec::new();
        clap_mangen::Man::new(sub.clone().name(name.clone()))
            .render(&mut buffer)
            .with_context(|| format!("failed to render {name} man page"))?;
        let path = out_dir.join(format!("{name}.1"));
        fs::write(&path, buffer).with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn completions(shell: Shell, out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut command = bookbot::command();
    let path = clap_complete::generate_to(shell, &mut command, "bookbot", out_dir)
        .with_context(|| format!("failed to generate {shell} completions"))?;
    println!("wrote {}", path.display());
    Ok(())
}
