//! # Project Graph
//!
//! The project graph is the model the IDE's build system reads: named groups
//! holding file references, and for each build target the list of build
//! files that are actually compiled.
//!
//! The reconciler only talks to the graph through the [`ProjectGraph`]
//! trait. Every object it creates is addressed by an identifier the caller
//! supplies (see [`crate::identifier`]), so running the same reconciliation
//! twice converges on the same objects. Implementations buffer all mutations
//! in memory until [`ProjectGraph::save`] is called.
//!
//! [`MemoryProject`] is the bundled implementation.

mod memory;

pub use memory::MemoryProject;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identifier::ObjectId;

/// A named container of groups and file references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub children: Vec<ObjectId>,
}

/// A reference to one file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub name: String,
    /// Relative to the project root, or absolute.
    pub path: PathBuf,
}

/// Membership of a file reference in a target's compile sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFile {
    pub id: ObjectId,
    pub file_ref: ObjectId,
}

/// The primitives the reconciler needs from a project.
pub trait ProjectGraph {
    /// Directory that relative file-reference paths resolve against.
    fn root(&self) -> &Path;

    /// The top-level group of the project.
    fn main_group(&self) -> ObjectId;

    /// Look up a group.
    fn group(&self, id: &ObjectId) -> Option<&Group>;

    /// Make sure group `id` exists and is a child of `parent`.
    ///
    /// An existing group keeps its children; a new one is created empty.
    fn ensure_group(&mut self, parent: &ObjectId, id: &ObjectId, name: &str) -> Result<()>;

    /// Detach every direct child of group `id` without deleting them.
    fn clear_group(&mut self, id: &ObjectId) -> Result<()>;

    /// Delete group `id`, everything under it, and its entry in its parent.
    fn remove_group(&mut self, id: &ObjectId) -> Result<()>;

    /// Children of group `id`, in order.
    fn group_children(&self, id: &ObjectId) -> Vec<ObjectId> {
        self.group(id)
            .map(|group| group.children.clone())
            .unwrap_or_default()
    }

    /// Look up a file reference.
    fn file_reference(&self, id: &ObjectId) -> Option<&FileReference>;

    /// Make sure file reference `id` exists with `path` and is a child of
    /// `group`.
    fn ensure_file_reference(&mut self, group: &ObjectId, id: &ObjectId, path: &Path) -> Result<()>;

    /// Delete file reference `id` and detach it from any group.
    fn remove_file_reference(&mut self, id: &ObjectId) -> Result<()>;

    /// Absolute path a file reference points to.
    fn resolve_path(&self, id: &ObjectId) -> Option<PathBuf> {
        self.file_reference(id).map(|file| self.root().join(&file.path))
    }

    /// Names of all build targets.
    fn target_names(&self) -> Vec<String>;

    /// Build files of `target`, in order.
    fn build_files(&self, target: &str) -> Result<Vec<BuildFile>>;

    /// Replace the build files of `target`.
    fn set_build_files(&mut self, target: &str, files: Vec<BuildFile>) -> Result<()>;

    /// Add build file `id` for `file_ref` to `target`, unless `id` is already
    /// present.
    fn add_build_file(&mut self, target: &str, id: &ObjectId, file_ref: &ObjectId) -> Result<()>;

    /// Remove build file `id` from `target`.
    fn remove_build_file(&mut self, target: &str, id: &ObjectId) -> Result<()>;

    /// Write the graph back to its document.
    fn save(&self) -> Result<()>;
}
