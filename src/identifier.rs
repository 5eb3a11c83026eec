//! Deterministic object identifiers for the project graph.
//!
//! Every group, file reference and build file the reconciler creates is
//! addressed by an identifier hashed from a stable string key. The same key
//! always yields the same identifier, so repeated runs reuse existing objects
//! instead of minting new ones and the persisted project stays diff-friendly.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of hash bytes kept in an identifier (24 hex characters).
const ID_BYTES: usize = 12;

/// Identifier of an object in the project graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wraps an existing identifier string, e.g. one read from a project file.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the identifier for `key`.
///
/// # Examples
///
/// ```
/// use seeds::identifier::stable_id;
///
/// let id = stable_id("Seeds/Widget");
/// assert_eq!(id, stable_id("Seeds/Widget"));
/// assert_eq!(id.as_str().len(), 24);
/// ```
pub fn stable_id(key: &str) -> ObjectId {
    let digest = Sha256::digest(key.as_bytes());
    let hex: String = digest[..ID_BYTES]
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect();
    ObjectId(hex)
}

/// Key of the top-level container group.
pub fn container_key(container: &str) -> String {
    container.to_string()
}

/// Key of the group holding one seed's files.
pub fn seed_group_key(container: &str, seed: &str) -> String {
    format!("{}/{}", container, seed)
}

/// Key of a build file placing `file_path` into `target`.
pub fn build_file_key(target: &str, file_path: &str) -> String {
    format!("{}:{}", target, file_path)
}
