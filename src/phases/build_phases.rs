//! ReconcileBuildPhases: make each target compile exactly the non-header
//! files of the seeds bound to it.
//!
//! Runs after [`super::groups`], so the seed groups already reflect what is on
//! disk. Each target first loses its zombie entries, then has its seed
//! entries rebuilt against the bound seeds' files.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::{debug, info};

use super::groups::{container_id, seed_files};
use crate::error::Result;
use crate::identifier::{build_file_key, stable_id, ObjectId};
use crate::path::to_slash;
use crate::project::{BuildFile, ProjectGraph};
use crate::sources::is_header;

/// Mutations made while reconciling build phases, over all targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildPhaseSummary {
    pub added: usize,
    pub removed: usize,
    /// Entries dropped because their file reference or file was gone.
    pub zombies: usize,
}

/// Reconcile the build phase of every target in the project.
///
/// Build files that point into a seed group are kept only when the seed is
/// bound to the target, the file is not a header, and the entry carries the
/// identifier derived from the target and the file's path. Each such file
/// appears once. Entries pointing outside the seed groups are left alone.
pub fn execute<P: ProjectGraph>(
    project: &mut P,
    bindings: &BTreeMap<String, BTreeSet<String>>,
) -> Result<BuildPhaseSummary> {
    let mut summary = BuildPhaseSummary::default();
    let seeds = seed_groups(project);

    for target in project.target_names() {
        summary.zombies += drop_zombies(project, &target)?;

        // Every file reference owned by a seed group, and for the bound,
        // compilable ones the build file id they should carry.
        let mut owned: HashSet<ObjectId> = HashSet::new();
        let mut wanted: HashMap<ObjectId, ObjectId> = HashMap::new();
        let mut desired: Vec<(BuildFile, String)> = Vec::new();
        for seed in &seeds {
            let bound = is_bound(bindings, seed, &target);
            for (file_ref, path) in seed_files(project, seed) {
                owned.insert(file_ref.clone());
                if !bound || is_header(&path) {
                    continue;
                }
                let Some(relative) = project
                    .file_reference(&file_ref)
                    .map(|file| to_slash(&file.path))
                else {
                    continue;
                };
                let id = stable_id(&build_file_key(&target, &relative));
                wanted.insert(file_ref.clone(), id.clone());
                desired.push((BuildFile { id, file_ref }, relative));
            }
        }

        let mut present: HashSet<ObjectId> = HashSet::new();
        let mut kept = Vec::new();
        let mut changed = false;
        for build_file in project.build_files(&target)? {
            if owned.contains(&build_file.file_ref) {
                let expected = wanted.get(&build_file.file_ref);
                if expected != Some(&build_file.id) || !present.insert(build_file.id.clone()) {
                    debug!("Removing {} from target {}", build_file.id, target);
                    summary.removed += 1;
                    changed = true;
                    continue;
                }
            }
            kept.push(build_file);
        }

        for (build_file, relative) in desired {
            if present.insert(build_file.id.clone()) {
                debug!("Adding {} to target {}", relative, target);
                kept.push(build_file);
                summary.added += 1;
                changed = true;
            }
        }

        if changed {
            project.set_build_files(&target, kept)?;
        }
    }

    Ok(summary)
}

/// Names of the seed groups under the container.
fn seed_groups<P: ProjectGraph>(project: &P) -> Vec<String> {
    project
        .group_children(&container_id())
        .iter()
        .filter_map(|child| project.group(child).map(|group| group.name.clone()))
        .collect()
}

fn is_bound(bindings: &BTreeMap<String, BTreeSet<String>>, seed: &str, target: &str) -> bool {
    bindings
        .get(seed)
        .is_some_and(|targets| targets.contains(target))
}

/// Remove build files whose file reference no longer resolves to a file on
/// disk. Returns how many were removed.
fn drop_zombies<P: ProjectGraph>(project: &mut P, target: &str) -> Result<usize> {
    let build_files = project.build_files(target)?;
    let before = build_files.len();
    let kept: Vec<_> = build_files
        .into_iter()
        .filter(|build_file| {
            project
                .resolve_path(&build_file.file_ref)
                .is_some_and(|path| path.exists())
        })
        .collect();
    let dropped = before - kept.len();
    if dropped > 0 {
        info!("Dropping {} missing files from target {}", dropped, target);
        project.set_build_files(target, kept)?;
    }
    Ok(dropped)
}
