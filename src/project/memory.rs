//! In-memory project graph persisted as a JSON document.
//!
//! Objects live in a single table keyed by identifier and tagged by kind, in
//! the spirit of the IDE project formats this models:
//!
//! ```json
//! {
//!   "main_group": "…",
//!   "objects": {
//!     "…": { "isa": "PBXGroup", "name": "Seeds", "children": ["…"] },
//!     "…": { "isa": "PBXFileReference", "name": "A.swift", "path": "Seeds/W/A.swift" }
//!   },
//!   "targets": [ { "name": "App", "build_files": [ { "id": "…", "file_ref": "…" } ] } ]
//! }
//! ```
//!
//! Maps are ordered, so saving an unchanged graph reproduces the same bytes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BuildFile, FileReference, Group, ProjectGraph};
use crate::error::{Error, Result};
use crate::identifier::{stable_id, ObjectId};

/// Key of the main group of a freshly created project.
const MAIN_GROUP_KEY: &str = "<main>";

/// One entry of the object table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "isa")]
enum Object {
    #[serde(rename = "PBXGroup")]
    Group(Group),
    #[serde(rename = "PBXFileReference")]
    FileReference(FileReference),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Target {
    name: String,
    #[serde(default)]
    build_files: Vec<BuildFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Document {
    main_group: ObjectId,
    #[serde(default)]
    objects: BTreeMap<ObjectId, Object>,
    #[serde(default)]
    targets: Vec<Target>,
}

/// A project graph held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryProject {
    document: Document,
    root: PathBuf,
    path: Option<PathBuf>,
}

impl MemoryProject {
    /// Create an empty project whose file references resolve against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let main_group = stable_id(MAIN_GROUP_KEY);
        let mut objects = BTreeMap::new();
        objects.insert(
            main_group.clone(),
            Object::Group(Group {
                name: String::new(),
                children: Vec::new(),
            }),
        );
        Self {
            document: Document {
                main_group,
                objects,
                targets: Vec::new(),
            },
            root: root.into(),
            path: None,
        }
    }

    /// Open the project document at `path`.
    ///
    /// Relative file references resolve against the document's directory.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let document: Document = serde_json::from_str(&content)?;
        if !matches!(document.objects.get(&document.main_group), Some(Object::Group(_))) {
            return Err(Error::Project {
                message: format!(
                    "{}: main group {} is missing",
                    path.display(),
                    document.main_group
                ),
            });
        }
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self {
            document,
            root,
            path: Some(path.to_path_buf()),
        })
    }

    /// Persist to `path` from now on.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Add an empty build target.
    pub fn add_target(&mut self, name: &str) {
        if !self.document.targets.iter().any(|target| target.name == name) {
            self.document.targets.push(Target {
                name: name.to_string(),
                build_files: Vec::new(),
            });
        }
    }

    /// Serialize the document.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.document)?;
        json.push('\n');
        Ok(json)
    }

    /// Number of objects in the table, groups and file references alike.
    pub fn object_count(&self) -> usize {
        self.document.objects.len()
    }

    fn target_mut(&mut self, name: &str) -> Result<&mut Target> {
        self.document
            .targets
            .iter_mut()
            .find(|target| target.name == name)
            .ok_or_else(|| Error::Project {
                message: format!("no target named '{}'", name),
            })
    }

    fn group_mut(&mut self, id: &ObjectId) -> Result<&mut Group> {
        match self.document.objects.get_mut(id) {
            Some(Object::Group(group)) => Ok(group),
            _ => Err(Error::Project {
                message: format!("{} is not a group", id),
            }),
        }
    }

    fn detach(&mut self, id: &ObjectId) {
        for object in self.document.objects.values_mut() {
            if let Object::Group(group) = object {
                group.children.retain(|child| child != id);
            }
        }
    }

    fn attach(&mut self, parent: &ObjectId, id: &ObjectId) -> Result<()> {
        let parent = self.group_mut(parent)?;
        if !parent.children.contains(id) {
            parent.children.push(id.clone());
        }
        Ok(())
    }
}

impl ProjectGraph for MemoryProject {
    fn root(&self) -> &Path {
        &self.root
    }

    fn main_group(&self) -> ObjectId {
        self.document.main_group.clone()
    }

    fn group(&self, id: &ObjectId) -> Option<&Group> {
        match self.document.objects.get(id) {
            Some(Object::Group(group)) => Some(group),
            _ => None,
        }
    }

    fn ensure_group(&mut self, parent: &ObjectId, id: &ObjectId, name: &str) -> Result<()> {
        match self.document.objects.get(id) {
            Some(Object::Group(_)) => {}
            Some(Object::FileReference(_)) => {
                return Err(Error::Project {
                    message: format!("{} is a file reference, not a group", id),
                })
            }
            None => {
                self.document.objects.insert(
                    id.clone(),
                    Object::Group(Group {
                        name: name.to_string(),
                        children: Vec::new(),
                    }),
                );
            }
        }
        self.attach(parent, id)
    }

    fn clear_group(&mut self, id: &ObjectId) -> Result<()> {
        self.group_mut(id)?.children.clear();
        Ok(())
    }

    fn remove_group(&mut self, id: &ObjectId) -> Result<()> {
        if *id == self.document.main_group {
            return Err(Error::Project {
                message: "the main group cannot be removed".to_string(),
            });
        }
        let children = self.group_mut(id)?.children.clone();
        for child in &children {
            match self.document.objects.get(child) {
                Some(Object::Group(_)) => self.remove_group(child)?,
                Some(Object::FileReference(_)) => self.remove_file_reference(child)?,
                None => {}
            }
        }
        self.document.objects.remove(id);
        self.detach(id);
        Ok(())
    }

    fn file_reference(&self, id: &ObjectId) -> Option<&FileReference> {
        match self.document.objects.get(id) {
            Some(Object::FileReference(file)) => Some(file),
            _ => None,
        }
    }

    fn ensure_file_reference(
        &mut self,
        group: &ObjectId,
        id: &ObjectId,
        path: &Path,
    ) -> Result<()> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.document.objects.get_mut(id) {
            Some(Object::FileReference(file)) => {
                if file.path != path {
                    file.path = path.to_path_buf();
                    file.name = name;
                }
            }
            Some(Object::Group(_)) => {
                return Err(Error::Project {
                    message: format!("{} is a group, not a file reference", id),
                })
            }
            None => {
                self.document.objects.insert(
                    id.clone(),
                    Object::FileReference(FileReference {
                        name,
                        path: path.to_path_buf(),
                    }),
                );
            }
        }
        self.attach(group, id)
    }

    fn remove_file_reference(&mut self, id: &ObjectId) -> Result<()> {
        if let Some(Object::FileReference(_)) = self.document.objects.get(id) {
            self.document.objects.remove(id);
            self.detach(id);
        }
        Ok(())
    }

    fn target_names(&self) -> Vec<String> {
        self.document
            .targets
            .iter()
            .map(|target| target.name.clone())
            .collect()
    }

    fn build_files(&self, target: &str) -> Result<Vec<BuildFile>> {
        self.document
            .targets
            .iter()
            .find(|candidate| candidate.name == target)
            .map(|found| found.build_files.clone())
            .ok_or_else(|| Error::Project {
                message: format!("no target named '{}'", target),
            })
    }

    fn set_build_files(&mut self, target: &str, files: Vec<BuildFile>) -> Result<()> {
        self.target_mut(target)?.build_files = files;
        Ok(())
    }

    fn add_build_file(&mut self, target: &str, id: &ObjectId, file_ref: &ObjectId) -> Result<()> {
        let target = self.target_mut(target)?;
        if !target.build_files.iter().any(|file| file.id == *id) {
            target.build_files.push(BuildFile {
                id: id.clone(),
                file_ref: file_ref.clone(),
            });
        }
        Ok(())
    }

    fn remove_build_file(&mut self, target: &str, id: &ObjectId) -> Result<()> {
        self.target_mut(target)?
            .build_files
            .retain(|file| file.id != *id);
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let path = self.path.as_ref().ok_or_else(|| Error::Project {
            message: "project has no backing file".to_string(),
        })?;
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
