//! RemoveDisusedSeeds: reclaim the checkouts of seeds dropped from the
//! manifest.
//!
//! Only seeds recorded in the lock are considered. Removing the directory is
//! enough for the reconciler to drop the seed's group, file references and
//! build files later in the same run, since none of its files exist anymore.

use super::diff::LockDiff;
use crate::error::Result;
use crate::repository::RepositoryManager;

/// Delete the checkout of every removed seed. Returns the names of the seeds
/// whose directory was actually deleted.
pub fn execute(diff: &LockDiff, repo_manager: &RepositoryManager) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for name in &diff.removed {
        if repo_manager.remove(name)? {
            removed.push(name.clone());
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_removes_only_disused_checkouts() {
        let temp = TempDir::new().unwrap();
        let seeds = temp.path().join("Seeds");
        fs::create_dir_all(seeds.join("Legacy/Sources")).unwrap();
        fs::create_dir_all(seeds.join("Widget/Sources")).unwrap();
        let manager = RepositoryManager::new(seeds.clone());

        let diff = LockDiff {
            removed: vec!["Legacy".to_string(), "Ghost".to_string()],
            unchanged: vec!["Widget".to_string()],
            ..LockDiff::default()
        };
        let removed = execute(&diff, &manager).unwrap();

        assert_eq!(removed, vec!["Legacy".to_string()]);
        assert!(!seeds.join("Legacy").exists());
        assert!(seeds.join("Widget").exists());
    }
}
