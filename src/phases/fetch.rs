//! SyncAndCollect: bring every seed's checkout to its version and gather
//! its source files.
//!
//! Seeds are handled one at a time. A seed whose sync fails does not stop the
//! run: the failure is logged and recorded, and whatever its directory holds
//! afterwards (possibly nothing) is what gets collected.

use log::warn;

use crate::error::{FetchError, Result};
use crate::evaluator::DesiredState;
use crate::repository::{RepositoryManager, SyncOutcome};
use crate::sources::{self, SourceFileSet};

/// Result of syncing one seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub name: String,
    pub version: String,
    pub outcome: std::result::Result<SyncOutcome, FetchError>,
    /// Number of source files collected after the sync.
    pub files: usize,
}

/// Everything SyncAndCollect produced.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub reports: Vec<SeedReport>,
    pub source_files: SourceFileSet,
}

/// Sync and collect every seed in `desired`, in name order.
pub fn execute(desired: &DesiredState, repo_manager: &RepositoryManager) -> Result<FetchResult> {
    let mut result = FetchResult::default();

    for seed in desired.seeds.values() {
        let outcome = repo_manager.sync(seed);
        if let Err(error) = &outcome {
            warn!("{}: {}", seed.name, error);
        }

        let dir = repo_manager.seed_dir(&seed.name);
        let mut files = 0;
        if dir.is_dir() {
            let collected = sources::collect(seed, &dir)?;
            files = collected.len();
            result.source_files.insert(seed.name.clone(), collected);
        }

        result.reports.push(SeedReport {
            name: seed.name.clone(),
            version: seed.version.clone(),
            outcome,
            files,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Seed;
    use crate::repository::GitOperations;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Clones succeed for Widget only, leaving one Swift file and one header.
    struct WidgetOnly;

    impl GitOperations for WidgetOnly {
        fn clone_repository(
            &self,
            url: &str,
            _reference: &str,
            target_dir: &Path,
        ) -> std::result::Result<(), FetchError> {
            if !url.ends_with("/Widget") {
                return Err(FetchError::RepositoryNotFound {
                    url: url.to_string(),
                });
            }
            fs::create_dir_all(target_dir.join("Sources")).unwrap();
            fs::write(target_dir.join("Sources/Widget.swift"), "").unwrap();
            fs::write(target_dir.join("Sources/Widget.h"), "").unwrap();
            Ok(())
        }

        fn describe_tag(&self, _dir: &Path) -> Option<String> {
            None
        }

        fn reset_hard(&self, _dir: &Path) -> std::result::Result<(), FetchError> {
            Ok(())
        }

        fn fetch_checkout(
            &self,
            dir: &Path,
            url: &str,
            _reference: &str,
        ) -> std::result::Result<(), FetchError> {
            Err(FetchError::Command {
                command: "fetch".to_string(),
                message: format!("offline: {} ({})", url, dir.display()),
            })
        }
    }

    fn desired(names: &[&str]) -> DesiredState {
        let mut state = DesiredState::default();
        for name in names {
            state.seeds.insert(
                name.to_string(),
                Seed {
                    name: name.to_string(),
                    url: format!("https://github.com/acme/{}", name),
                    version: "1.0.0".to_string(),
                    files: vec!["**/*.{h,swift}".to_string()],
                    exclude_files: vec![],
                },
            );
        }
        state
    }

    fn manager(temp: &TempDir) -> RepositoryManager {
        RepositoryManager::with_operations(Box::new(WidgetOnly), temp.path().join("Seeds"))
    }

    #[test]
    fn test_failed_seed_is_reported_and_skipped() {
        let temp = TempDir::new().unwrap();
        testing_logger::setup();

        let result = execute(&desired(&["Ghost", "Widget"]), &manager(&temp)).unwrap();

        assert_eq!(result.reports.len(), 2);
        assert_eq!(
            result.reports[0].outcome,
            Err(FetchError::RepositoryNotFound {
                url: "https://github.com/acme/Ghost".to_string()
            })
        );
        assert_eq!(result.reports[0].files, 0);
        assert_eq!(result.reports[1].outcome, Ok(SyncOutcome::Cloned));
        assert_eq!(result.reports[1].files, 2);
        assert!(!result.source_files.contains_key("Ghost"));
        assert_eq!(result.source_files["Widget"].len(), 2);

        testing_logger::validate(|captured_logs| {
            let warnings: Vec<_> = captured_logs
                .iter()
                .filter(|log| log.level == log::Level::Warn)
                .collect();
            assert_eq!(warnings.len(), 1);
            assert!(warnings[0].body.starts_with("Ghost: repository not found"));
        });
    }

    #[test]
    fn test_failed_update_still_collects_existing_checkout() {
        let temp = TempDir::new().unwrap();
        let checkout = temp.path().join("Seeds/Widget/Sources");
        fs::create_dir_all(&checkout).unwrap();
        fs::write(checkout.join("Old.swift"), "").unwrap();

        let result = execute(&desired(&["Widget"]), &manager(&temp)).unwrap();

        assert!(matches!(
            result.reports[0].outcome,
            Err(FetchError::Command { .. })
        ));
        assert_eq!(
            result.source_files["Widget"],
            vec![checkout.join("Old.swift")]
        );
    }
}
