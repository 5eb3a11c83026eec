//! # Lock File
//!
//! The lock file records which seeds are installed at which refs. It is the
//! only state carried from one run to the next, and is what lets a run
//! recognize seeds that were removed from the manifest.
//!
//! The format is a YAML document with a single `SEEDS` key holding a list of
//! `"name (version)"` entries in name order:
//!
//! ```yaml
//! SEEDS:
//! - Gadget (v2)
//! - Widget (1.2.0)
//! ```

use std::fmt;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::evaluator::Seed;
use crate::path::is_plain_name;

/// A previously installed seed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LockEntry {
    pub name: String,
    pub version: String,
}

impl LockEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse a `"name (version)"` entry.
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        let (name, rest) = entry.split_once(" (")?;
        let version = rest.strip_suffix(')')?;
        if !is_plain_name(name) || version.is_empty() {
            return None;
        }
        Some(Self::new(name, version))
    }
}

impl fmt::Display for LockEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// On-disk shape of the lock file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LockFile {
    #[serde(rename = "SEEDS", default)]
    seeds: Vec<String>,
}

/// Load the lock file at `path`.
///
/// A missing lock file is a first run and yields an empty set. A lock file
/// that exists but cannot be read is an error.
pub fn load(path: &Path) -> Result<Vec<LockEntry>> {
    if !path.exists() {
        debug!("No lock file at {}; treating as first run", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let lock: LockFile = serde_yaml::from_str(&content).map_err(|e| Error::Lock {
        message: format!("{}: {}", path.display(), e),
    })?;

    lock.seeds
        .iter()
        .map(|entry| {
            LockEntry::parse(entry).ok_or_else(|| Error::Lock {
                message: format!("malformed entry '{}' in {}", entry, path.display()),
            })
        })
        .collect()
}

/// Render the lock document for `seeds`, sorted by name.
pub fn render<'a, I>(seeds: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Seed>,
{
    let mut entries: Vec<LockEntry> = seeds
        .into_iter()
        .map(|seed| LockEntry::new(&seed.name, &seed.version))
        .collect();
    entries.sort();

    let lock = LockFile {
        seeds: entries.iter().map(LockEntry::to_string).collect(),
    };
    Ok(serde_yaml::to_string(&lock)?)
}

/// Write the lock file for `seeds` to `path`.
pub fn save<'a, I>(path: &Path, seeds: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Seed>,
{
    std::fs::write(path, render(seeds)?)?;
    Ok(())
}
