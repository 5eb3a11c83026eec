//! Orchestrator for the complete install operation
//!
//! This module sequences the phases into the install pipeline:
//! 1. PrepareEnvironment - locate the project and the manifest (done by the
//!    caller through [`super::environment`])
//! 2. EvaluateManifest - run the manifest against the project's targets
//! 3. LoadLock - read the previous lock, if any
//! 4. RemoveDisusedSeeds - delete checkouts of seeds dropped from the manifest
//! 5. SyncAndCollect - sync each seed and gather its files
//! 6. ReconcileGroups / ReconcileBuildPhases - update the project graph
//! 7. PersistProjectGraph - write the project
//! 8. WriteLock - record the installed seeds
//!
//! Any error returned from here is fatal. Per-seed fetch failures are not
//! errors; they are recorded in the [`InstallReport`].

use std::path::PathBuf;

use log::{debug, info};

use super::build_phases::{self, BuildPhaseSummary};
use super::cleanup;
use super::diff::{self, LockDiff};
use super::environment::Environment;
use super::fetch::{self, SeedReport};
use super::groups::{self, GroupSummary};
use crate::error::Result;
use crate::evaluator::{self, DesiredState};
use crate::lock;
use crate::manifest;
use crate::project::{MemoryProject, ProjectGraph};
use crate::repository::RepositoryManager;

/// What an install run did.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub diff: LockDiff,
    pub seeds: Vec<SeedReport>,
    /// Seeds whose checkout was deleted.
    pub removed: Vec<String>,
    pub groups: GroupSummary,
    pub build_phases: BuildPhaseSummary,
}

impl InstallReport {
    /// Seeds whose sync failed.
    pub fn failures(&self) -> impl Iterator<Item = &SeedReport> {
        self.seeds.iter().filter(|seed| seed.outcome.is_err())
    }
}

/// Evaluate the manifest against the targets of `project`.
pub fn evaluate<P: ProjectGraph>(env: &Environment, project: &P) -> Result<DesiredState> {
    let manifest = manifest::from_file(&env.manifest_path)?;
    let targets = project.target_names();
    let desired = evaluator::evaluate(&manifest, targets.as_slice())?;
    debug!("Manifest declares {} seeds", desired.seeds.len());
    Ok(desired)
}

/// Run the install pipeline against the project document found in `env`.
pub fn execute_install(
    env: &Environment,
    repo_manager: &RepositoryManager,
) -> Result<InstallReport> {
    let mut project = MemoryProject::open(&env.project_path)?;
    execute_with_project(env, &mut project, repo_manager)
}

/// Run the install pipeline against an already opened project.
///
/// The project is saved through [`ProjectGraph::save`] before the lock is
/// written.
pub fn execute_with_project<P: ProjectGraph>(
    env: &Environment,
    project: &mut P,
    repo_manager: &RepositoryManager,
) -> Result<InstallReport> {
    let desired = evaluate(env, project)?;
    let locked = lock::load(&env.lock_path)?;
    let diff = diff::execute(&locked, &desired);

    let removed = cleanup::execute(&diff, repo_manager)?;
    for name in &removed {
        info!("Removed disused seed {}", name);
    }

    let fetched = fetch::execute(&desired, repo_manager)?;
    let groups = groups::execute(project, &fetched.source_files)?;
    let build_phases = build_phases::execute(project, &desired.bindings)?;

    project.save()?;
    lock::save(&env.lock_path, desired.seeds.values())?;

    Ok(InstallReport {
        diff,
        seeds: fetched.reports,
        removed,
        groups,
        build_phases,
    })
}

/// Read-only view of what an install would do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub diff: LockDiff,
    /// Desired seeds without a checkout directory.
    pub missing: Vec<String>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.diff.is_empty() && self.missing.is_empty()
    }
}

/// Compare manifest, lock and checkouts without touching anything.
pub fn execute_status(env: &Environment) -> Result<StatusReport> {
    let project = MemoryProject::open(&env.project_path)?;
    let desired = evaluate(env, &project)?;
    let locked = lock::load(&env.lock_path)?;
    let missing = desired
        .seeds
        .keys()
        .filter(|name| !checkout_dir(env, name).is_dir())
        .cloned()
        .collect();
    Ok(StatusReport {
        diff: diff::execute(&locked, &desired),
        missing,
    })
}

fn checkout_dir(env: &Environment, name: &str) -> PathBuf {
    env.seeds_dir.join(name)
}
