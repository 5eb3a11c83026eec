//! Compare the desired state with the previously locked state.

use std::collections::BTreeMap;

use crate::evaluator::DesiredState;
use crate::lock::LockEntry;

/// How the desired seeds differ from the lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockDiff {
    /// Desired seeds absent from the lock.
    pub added: Vec<String>,
    /// Seeds whose version changed: `(name, locked, desired)`.
    pub changed: Vec<(String, String, String)>,
    /// Locked seeds that are no longer desired.
    pub removed: Vec<String>,
    /// Seeds locked at the desired version.
    pub unchanged: Vec<String>,
}

impl LockDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }
}

/// Diff `desired` against `locked`. Every list is sorted by name.
pub fn execute(locked: &[LockEntry], desired: &DesiredState) -> LockDiff {
    let locked: BTreeMap<&str, &str> = locked
        .iter()
        .map(|entry| (entry.name.as_str(), entry.version.as_str()))
        .collect();

    let mut diff = LockDiff::default();
    for (name, seed) in &desired.seeds {
        match locked.get(name.as_str()) {
            None => diff.added.push(name.clone()),
            Some(version) if *version == seed.version => diff.unchanged.push(name.clone()),
            Some(version) => {
                diff.changed
                    .push((name.clone(), version.to_string(), seed.version.clone()))
            }
        }
    }
    diff.removed = locked
        .keys()
        .filter(|name| !desired.seeds.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    diff
}
