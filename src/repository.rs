//! # Seed Checkouts
//!
//! This module provides the `RepositoryManager`, which keeps one working copy
//! per seed under `<root>/Seeds/<name>` in step with the seed's declared ref.
//!
//! ## Design
//!
//! Version control is reached through the [`GitOperations`] trait, so the
//! sync logic can be exercised without a network or a `git` binary. In the
//! application, [`DefaultGitOperations`] delegates to the system `git`
//! command (see [`crate::git`]); tests inject their own implementation.
//!
//! ## Sync rules
//!
//! - A missing checkout is cloned at the seed's ref.
//! - An existing checkout whose current tag already equals the ref is left
//!   alone.
//! - Any other checkout is force-reset (local edits are discarded) and moved
//!   to the ref. The `Seeds/` directory belongs to the tool; it is never
//!   meant to be edited by hand.
//!
//! Failures are returned per seed as a [`FetchError`] and never retried.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{FetchError, Result};
use crate::evaluator::Seed;
use crate::path::is_plain_name;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clone `url` into `target_dir` with `reference` checked out.
    fn clone_repository(
        &self,
        url: &str,
        reference: &str,
        target_dir: &Path,
    ) -> std::result::Result<(), FetchError>;

    /// The tag currently checked out in `dir`, if any.
    fn describe_tag(&self, dir: &Path) -> Option<String>;

    /// Discard all local modifications and untracked files in `dir`.
    fn reset_hard(&self, dir: &Path) -> std::result::Result<(), FetchError>;

    /// Fetch `reference` from the remote and check it out in `dir`.
    fn fetch_checkout(
        &self,
        dir: &Path,
        url: &str,
        reference: &str,
    ) -> std::result::Result<(), FetchError>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repository(
        &self,
        url: &str,
        reference: &str,
        target_dir: &Path,
    ) -> std::result::Result<(), FetchError> {
        crate::git::clone(url, reference, target_dir)
    }

    fn describe_tag(&self, dir: &Path) -> Option<String> {
        crate::git::describe_tag(dir)
    }

    fn reset_hard(&self, dir: &Path) -> std::result::Result<(), FetchError> {
        crate::git::reset_hard(dir)
    }

    fn fetch_checkout(
        &self,
        dir: &Path,
        url: &str,
        reference: &str,
    ) -> std::result::Result<(), FetchError> {
        crate::git::fetch_checkout(dir, url, reference)
    }
}

/// What a successful sync did to a seed's checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The checkout did not exist and was cloned.
    Cloned,
    /// The checkout was reset and moved from `previous` to the declared ref.
    Updated { previous: Option<String> },
    /// The checkout was already at the declared ref.
    UpToDate,
}

/// Owns the seed checkout directory and keeps it in sync with seeds.
pub struct RepositoryManager {
    git_ops: Box<dyn GitOperations>,
    seeds_dir: PathBuf,
}

impl RepositoryManager {
    /// Creates a new `RepositoryManager` backed by the system `git`, keeping
    /// checkouts under `seeds_dir`.
    pub fn new(seeds_dir: PathBuf) -> Self {
        Self::with_operations(Box::new(DefaultGitOperations), seeds_dir)
    }

    /// Creates a `RepositoryManager` with a custom `GitOperations`
    /// implementation.
    pub fn with_operations(git_ops: Box<dyn GitOperations>, seeds_dir: PathBuf) -> Self {
        Self { git_ops, seeds_dir }
    }

    pub fn seeds_dir(&self) -> &Path {
        &self.seeds_dir
    }

    /// The checkout directory of the seed called `name`.
    pub fn seed_dir(&self, name: &str) -> PathBuf {
        self.seeds_dir.join(name)
    }

    /// Bring the checkout of `seed` to the seed's version.
    pub fn sync(&self, seed: &Seed) -> std::result::Result<SyncOutcome, FetchError> {
        if !is_plain_name(&seed.name) {
            return Err(FetchError::Command {
                command: "sync".to_string(),
                message: format!("'{}' is not a valid seed directory name", seed.name),
            });
        }
        let dir = self.seed_dir(&seed.name);

        if !dir.exists() {
            info!("Installing {} ({})", seed.name, seed.version);
            self.git_ops.clone_repository(&seed.url, &seed.version, &dir)?;
            return Ok(SyncOutcome::Cloned);
        }

        let current = self.git_ops.describe_tag(&dir);
        if current.as_deref() == Some(seed.version.as_str()) {
            debug!("{} is already at {}", seed.name, seed.version);
            return Ok(SyncOutcome::UpToDate);
        }

        info!(
            "Updating {} ({} -> {})",
            seed.name,
            current.as_deref().unwrap_or("unknown"),
            seed.version
        );
        self.git_ops.reset_hard(&dir)?;
        self.git_ops.fetch_checkout(&dir, &seed.url, &seed.version)?;
        Ok(SyncOutcome::Updated { previous: current })
    }

    /// Delete the checkout of the seed called `name`.
    ///
    /// Returns `true` if a directory was removed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        if !is_plain_name(name) {
            warn!("Refusing to remove '{}': not a seed directory name", name);
            return Ok(false);
        }
        let dir = self.seed_dir(name);
        if !dir.exists() {
            return Ok(false);
        }
        info!("Removing {}", name);
        std::fs::remove_dir_all(&dir)?;
        Ok(true)
    }
}
