//! # Error Handling
//!
//! This module defines the centralized error types for `seeds`. It uses the
//! `thiserror` library to describe every failure mode with a clear message.
//!
//! ## Key Components
//!
//! - **`Error`**: Fatal errors. Any of these aborts the current run. They
//!   cover the precondition failures (missing project or manifest, unknown
//!   target, malformed dependency identifier, invalid file pattern) as well
//!   as I/O and document (de)serialization failures.
//!
//! - **`FetchError`**: Per-seed version-control failures. These are never
//!   propagated with `?` out of the pipeline; the orchestrator records them
//!   in the run report and carries on with the remaining seeds.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for seeds operations
#[derive(Error, Debug)]
pub enum Error {
    /// No project file could be located under the project root.
    #[error(
        "No project file found in {}\n  hint: pass --project or create a *.seedproj file",
        root.display()
    )]
    ProjectNotFound { root: PathBuf },

    /// The manifest file does not exist.
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// The manifest could not be understood.
    ///
    /// Includes the specific parsing issue and optionally a hint about how to
    /// fix it.
    #[error("Manifest parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// A `target` block named a build target that the project does not have.
    #[error("Unknown target '{name}' (available: {})", available.join(", "))]
    UnknownTarget {
        name: String,
        available: Vec<String>,
    },

    /// A dependency identifier did not resolve to exactly `owner/repo`.
    #[error("Malformed dependency identifier '{identifier}': expected 'owner/repo'")]
    MalformedIdentifier { identifier: String },

    /// A seed declared a file pattern that is not a valid glob.
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The lock file exists but cannot be interpreted.
    #[error("Lock file error: {message}")]
    Lock { message: String },

    /// The project graph document is inconsistent or cannot be persisted.
    #[error("Project graph error: {message}")]
    Project { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// A version-control failure scoped to a single seed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The remote repository does not exist or is not reachable.
    #[error("repository not found: {url}")]
    RepositoryNotFound { url: String },

    /// The repository exists but the requested ref does not.
    #[error("ref '{reference}' not found in {url}")]
    RefNotFound { url: String, reference: String },

    /// Any other git failure.
    #[error("git {command} failed: {message}")]
    Command { command: String, message: String },
}
