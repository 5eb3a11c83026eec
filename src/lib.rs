//! # Seeds Library
//!
//! This library provides the core of the `seeds` command-line tool: a
//! source-level dependency manager for IDE projects. A project declares
//! external source dependencies ("seeds") in a `Seedfile`, each pinned to a
//! git ref. Seeds are checked out under `Seeds/`, and their source files are
//! wired into the project's groups and build targets as if they had been added
//! by hand.
//!
//! ## Quick Example
//!
//! ```
//! use seeds::{evaluator, manifest};
//!
//! let manifest = manifest::parse(r#"
//! - github:
//!     repo: acme/Widget
//!     ref: 1.2.0
//!     files: "**/*.swift"
//! "#).unwrap();
//!
//! let desired = evaluator::evaluate(&manifest, &["App"]).unwrap();
//! assert_eq!(desired.seeds["Widget"].url, "https://github.com/acme/Widget");
//! assert!(desired.bindings["Widget"].contains("App"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`, `evaluator`)**: The `Seedfile` format and its
//!   evaluation into seeds and per-target bindings.
//! - **Lock (`lock`)**: The `Seedfile.lock` record of what the last run
//!   installed.
//! - **Repository Management (`repository`, `git`)**: Keeps each checkout at
//!   the declared ref.
//! - **Sources (`sources`)**: Expands a seed's file patterns into files.
//! - **Project Graph (`project`, `identifier`)**: Groups, file references and
//!   build phases, addressed by stable identifiers.
//! - **Phases (`phases`)**: The install pipeline.
//!
//! ## Execution Flow
//!
//! The main entry point is [`phases::execute_install`]:
//!
//! 1.  **Evaluate** the manifest against the project's targets.
//! 2.  **Diff** against the lock and delete checkouts of removed seeds.
//! 3.  **Sync** each seed with git and collect its source files.
//! 4.  **Reconcile** the project's groups, then each target's build phase.
//! 5.  **Persist** the project and then the lock.

pub mod defaults;
pub mod error;
pub mod evaluator;
pub mod git;
pub mod identifier;
pub mod lock;
pub mod manifest;
pub mod output;
pub mod path;
pub mod phases;
pub mod project;
pub mod repository;
pub mod sources;

#[cfg(test)]
mod identifier_proptest;
