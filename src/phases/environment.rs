//! PrepareEnvironment: locate the project document and the manifest.
//!
//! Both are preconditions. If either cannot be found the run stops here,
//! before any checkout is touched.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::defaults::{seeds_dir, LOCK_FILE, MANIFEST_FILE, PROJECT_EXTENSION};
use crate::error::{Error, Result};

/// Paths of everything a run reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub root: PathBuf,
    pub project_path: PathBuf,
    pub manifest_path: PathBuf,
    pub lock_path: PathBuf,
    pub seeds_dir: PathBuf,
}

/// Resolve the environment for the project rooted at `root`.
///
/// `project` overrides project discovery; otherwise the first `*.seedproj`
/// file (by name) directly under `root` is used.
pub fn execute(root: &Path, project: Option<&Path>) -> Result<Environment> {
    if !root.is_dir() {
        return Err(Error::ProjectNotFound {
            root: root.to_path_buf(),
        });
    }

    let project_path = match project {
        Some(path) if path.is_file() => path.to_path_buf(),
        Some(_) => {
            return Err(Error::ProjectNotFound {
                root: root.to_path_buf(),
            })
        }
        None => discover_project(root)?,
    };

    let manifest_path = root.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(Error::ManifestNotFound {
            path: manifest_path,
        });
    }

    debug!(
        "Using project {} and manifest {}",
        project_path.display(),
        manifest_path.display()
    );
    Ok(Environment {
        root: root.to_path_buf(),
        project_path,
        manifest_path,
        lock_path: root.join(LOCK_FILE),
        seeds_dir: seeds_dir(root),
    })
}

fn discover_project(root: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|extension| extension == PROJECT_EXTENSION)
        })
        .collect();
    candidates.sort();

    if candidates.len() > 1 {
        warn!(
            "Found {} project files in {}; using {}",
            candidates.len(),
            root.display(),
            candidates[0].display()
        );
    }
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::ProjectNotFound {
            root: root.to_path_buf(),
        })
}
