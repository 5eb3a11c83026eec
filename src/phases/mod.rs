//! Implementation of the phases of the seeds install operation.
//!
//! ## Overview
//!
//! An install runs these phases strictly in order, one seed and one target at
//! a time:
//! 1. PrepareEnvironment - Locate the project document and the manifest
//! 2. EvaluateManifest - Turn the manifest into seeds and target bindings
//! 3. LoadLock - Read what the previous run installed
//! 4. RemoveDisusedSeeds - Delete checkouts of seeds no longer declared
//! 5. SyncAndCollect - Sync each checkout to its version and collect files
//! 6. ReconcileGroups - Rebuild the `Seeds` group tree
//! 7. ReconcileBuildPhases - Converge each target's compile sources
//! 8. PersistProjectGraph / WriteLock - Save the project, then the lock
//!
//! Graph mutations stay in memory until the project is saved, so a run that
//! fails before that point leaves the project document untouched.

pub mod build_phases;
pub mod cleanup;
pub mod diff;
pub mod environment;
pub mod fetch;
pub mod groups;
pub mod orchestrator;

pub use environment::Environment;
pub use orchestrator::{execute_install, execute_status, InstallReport, StatusReport};
