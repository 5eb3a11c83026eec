//! Install command implementation
//!
//! Runs the full install pipeline against a project root:
//! 1. Locate the project document and the `Seedfile`
//! 2. Evaluate the manifest and diff it against `Seedfile.lock`
//! 3. Delete checkouts of seeds no longer declared
//! 4. Sync every seed with git and collect its source files
//! 5. Reconcile groups and build phases, save the project, write the lock
//!
//! A seed that fails to sync is reported and skipped; only precondition
//! errors make the command fail.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use seeds::output::{emoji, seed_name, sync_line, OutputConfig};
use seeds::phases::{self, environment, InstallReport};
use seeds::repository::RepositoryManager;

use super::{resolve_project, resolve_root};

/// Arguments for the install command
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Project root containing the Seedfile (defaults to the current directory)
    #[arg(value_name = "ROOT", env = "SEEDS_ROOT")]
    pub root: Option<PathBuf>,

    /// Project document to update instead of the *.seedproj found in ROOT
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the install command
pub fn execute(args: InstallArgs, color_flag: &str) -> Result<()> {
    let start_time = Instant::now();
    let out = OutputConfig::from_env_and_flag(color_flag);

    let root = resolve_root(args.root.as_deref())?;
    let project = resolve_project(args.project.as_deref());
    let env = environment::execute(&root, project.as_deref())?;

    if !args.quiet {
        println!(
            "{} Installing seeds into {}",
            emoji(&out, "🌱", "[SEEDS]"),
            env.project_path.display()
        );
        println!();
    }

    let repo_manager = RepositoryManager::new(env.seeds_dir.clone());
    let report = match phases::execute_install(&env, &repo_manager) {
        Ok(report) => report,
        Err(e) => {
            if !args.quiet {
                println!("{} Install failed", emoji(&out, "❌", "[ERR]"));
                println!();
            }
            return Err(e.into());
        }
    };

    if !args.quiet {
        print_report(&out, &report);
        println!(
            "{} Installed {} seeds in {:.2}s",
            emoji(&out, "✅", "[OK]"),
            report.seeds.len(),
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

fn print_report(out: &OutputConfig, report: &InstallReport) {
    for seed in &report.seeds {
        println!(
            "{}",
            sync_line(out, &seed.name, &seed.version, &seed.outcome, seed.files)
        );
    }
    for name in &report.removed {
        println!(
            "{} {} (removed)",
            emoji(out, "🗑️", "[DEL]"),
            seed_name(out, name)
        );
    }

    let failures = report.failures().count();
    if failures > 0 {
        println!();
        println!(
            "{} {} seeds failed to sync; their previous files, if any, were kept",
            emoji(out, "⚠️", "[WARN]"),
            failures
        );
    }

    println!();
    println!(
        "   {} groups, {} file references ({} groups and {} references pruned)",
        report.groups.groups,
        report.groups.file_references,
        report.groups.removed_groups,
        report.groups.removed_file_references
    );
    println!(
        "   build phases: {} added, {} removed, {} missing files dropped",
        report.build_phases.added, report.build_phases.removed, report.build_phases.zombies
    );
}
