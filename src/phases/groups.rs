//! ReconcileGroups: make the `Seeds` container hold exactly one group per
//! collected seed, each holding exactly that seed's file references.
//!
//! The container is cleared and rebuilt on every run. Because every group and
//! file reference is addressed by [`stable_id`], rebuilding reuses the same
//! objects for unchanged paths and the persisted project only changes where
//! the seeds did.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::defaults::CONTAINER_GROUP;
use crate::error::Result;
use crate::identifier::{container_key, seed_group_key, stable_id, ObjectId};
use crate::path::relative_to;
use crate::project::ProjectGraph;
use crate::sources::SourceFileSet;

/// Mutations made while reconciling groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupSummary {
    /// Seed groups present after reconciliation.
    pub groups: usize,
    /// File references present after reconciliation.
    pub file_references: usize,
    /// Groups deleted because their seed is gone.
    pub removed_groups: usize,
    /// File references deleted because their file is gone.
    pub removed_file_references: usize,
}

/// Identifier of the top-level container group.
pub fn container_id() -> ObjectId {
    stable_id(&container_key(CONTAINER_GROUP))
}

/// Identifier of the group holding `seed`'s files.
pub fn seed_group_id(seed: &str) -> ObjectId {
    stable_id(&seed_group_key(CONTAINER_GROUP, seed))
}

/// Identifier of the file reference for `path`, given relative to the
/// project root.
pub fn file_reference_id(path: &str) -> ObjectId {
    stable_id(path)
}

/// Reconcile the container group against `source_files`.
pub fn execute<P: ProjectGraph>(
    project: &mut P,
    source_files: &SourceFileSet,
) -> Result<GroupSummary> {
    let mut summary = GroupSummary::default();
    let container = container_id();
    let main_group = project.main_group();
    project.ensure_group(&main_group, &container, CONTAINER_GROUP)?;

    let previous = project.group_children(&container);
    for child in &previous {
        if project.group(child).is_some() && !has_file_on_disk(project, child) {
            info!("Removing stale group {}", describe_group(project, child));
            project.remove_group(child)?;
            summary.removed_groups += 1;
        }
    }

    project.clear_group(&container)?;

    let root = project.root().to_path_buf();
    let mut attached = HashSet::new();
    for (name, files) in source_files {
        let group = seed_group_id(name);
        project.ensure_group(&container, &group, name)?;
        attached.insert(group.clone());

        let mut inserted = HashSet::new();
        for file in files {
            let relative = relative_to(file, &root);
            let id = file_reference_id(&relative);
            project.ensure_file_reference(&group, &id, Path::new(&relative))?;
            inserted.insert(id);
        }
        summary.file_references += inserted.len();

        for child in project.group_children(&group) {
            if inserted.contains(&child) {
                continue;
            }
            if project.file_reference(&child).is_some() {
                debug!("Removing {} from group {}", child, name);
                project.remove_file_reference(&child)?;
                summary.removed_file_references += 1;
            } else if project.group(&child).is_some() {
                project.remove_group(&child)?;
            }
        }
        summary.groups += 1;
    }

    // Groups of seeds that were neither collected nor pruned above would
    // otherwise linger detached from the container.
    for child in &previous {
        if !attached.contains(child) && project.group(child).is_some() {
            info!("Removing group {}", describe_group(project, child));
            project.remove_group(child)?;
            summary.removed_groups += 1;
        }
    }

    Ok(summary)
}

/// Whether any file reference below group `id` points at an existing file.
fn has_file_on_disk<P: ProjectGraph>(project: &P, id: &ObjectId) -> bool {
    project.group_children(id).iter().any(|child| {
        if project.group(child).is_some() {
            return has_file_on_disk(project, child);
        }
        project
            .resolve_path(child)
            .as_deref()
            .is_some_and(Path::exists)
    })
}

fn describe_group<P: ProjectGraph>(project: &P, id: &ObjectId) -> String {
    project
        .group(id)
        .map(|group| group.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Every file reference currently held by `seed`'s group, as absolute paths.
pub fn seed_files<P: ProjectGraph>(project: &P, seed: &str) -> Vec<(ObjectId, PathBuf)> {
    project
        .group_children(&seed_group_id(seed))
        .into_iter()
        .filter_map(|child| {
            let path = project.resolve_path(&child)?;
            Some((child, path))
        })
        .collect()
}
