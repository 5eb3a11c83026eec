//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `seeds`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `seeds` library.

pub mod check;
pub mod completions;
pub mod install;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve the project root: the given directory, or the current one.
///
/// Existing directories are canonicalized so that checkout paths and project
/// paths share a prefix.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    Ok(root.canonicalize().unwrap_or(root))
}

/// Canonicalize an explicit project path when it exists.
pub fn resolve_project(project: Option<&Path>) -> Option<PathBuf> {
    project.map(|path| path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}
