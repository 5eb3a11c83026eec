//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which compares the
//! `Seedfile`, `Seedfile.lock` and the checkouts under `Seeds/` and reports
//! what `install` would change.
//!
//! This command is a safe, read-only operation: it never runs git, and never
//! writes the project or the lock.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use seeds::output::{emoji, seed_name, OutputConfig};
use seeds::phases::{self, environment, StatusReport};

use super::{resolve_project, resolve_root};

/// Show what install would change
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project root containing the Seedfile (defaults to the current directory)
    #[arg(value_name = "ROOT", env = "SEEDS_ROOT")]
    pub root: Option<PathBuf>,

    /// Project document to read instead of the *.seedproj found in ROOT
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<PathBuf>,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let root = resolve_root(args.root.as_deref())?;
    let project = resolve_project(args.project.as_deref());
    let env = environment::execute(&root, project.as_deref())?;

    let status = phases::execute_status(&env)?;
    for line in status_lines(&out, &status) {
        println!("{}", line);
    }
    Ok(())
}

fn status_lines(out: &OutputConfig, status: &StatusReport) -> Vec<String> {
    if status.is_clean() {
        return vec![format!(
            "{} All seeds are installed and up to date",
            emoji(out, "✅", "[OK]")
        )];
    }

    let mut lines = Vec::new();
    for name in &status.diff.added {
        lines.push(format!(
            "{} {} will be installed",
            emoji(out, "📥", "[NEW]"),
            seed_name(out, name)
        ));
    }
    for (name, locked, desired) in &status.diff.changed {
        lines.push(format!(
            "{} {} will change from {} to {}",
            emoji(out, "🔄", "[UPD]"),
            seed_name(out, name),
            locked,
            desired
        ));
    }
    for name in &status.diff.removed {
        lines.push(format!(
            "{} {} will be removed",
            emoji(out, "🗑️", "[DEL]"),
            seed_name(out, name)
        ));
    }
    for name in &status.missing {
        if status.diff.added.contains(name) {
            continue;
        }
        lines.push(format!(
            "{} {} is locked but not checked out",
            emoji(out, "⚠️", "[WARN]"),
            seed_name(out, name)
        ));
    }
    lines
}
