//! Default values for seeds.
//!
//! This module provides the fixed file names, directories and patterns used
//! across the pipeline and the CLI, so they are defined in exactly one place.

use std::path::{Path, PathBuf};

/// Name of the manifest file, relative to the project root.
pub const MANIFEST_FILE: &str = "Seedfile";

/// Name of the lock file, relative to the project root.
pub const LOCK_FILE: &str = "Seedfile.lock";

/// Directory holding one checkout per seed, relative to the project root.
pub const SEEDS_DIR: &str = "Seeds";

/// Name of the top-level group that holds every seed group.
pub const CONTAINER_GROUP: &str = "Seeds";

/// File pattern used when a seed does not declare `files`.
pub const DEFAULT_FILE_PATTERN: &str = "**/*.{h,m,mm,swift}";

/// Extension of project graph documents discovered under the project root.
pub const PROJECT_EXTENSION: &str = "seedproj";

/// Returns the checkout directory for seeds under `root`.
pub fn seeds_dir(root: &Path) -> PathBuf {
    root.join(SEEDS_DIR)
}
