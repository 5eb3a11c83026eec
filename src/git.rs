//! Thin wrappers around the system `git` command.
//!
//! Using the system binary means SSH keys, credential helpers and any other
//! configuration in `~/.gitconfig` apply without extra work. Every command
//! runs to completion before returning; nothing here retries.

use std::path::Path;
use std::process::{Command, Output};
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::error::FetchError;

/// Clone `url` into `target_dir` and check out `reference`.
///
/// The clone is made without a checkout so that `reference` may be a tag, a
/// branch or a commit.
pub fn clone(url: &str, reference: &str, target_dir: &Path) -> Result<(), FetchError> {
    if let Some(parent) = target_dir.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FetchError::Command {
            command: "clone".to_string(),
            message: e.to_string(),
        })?;
    }

    let mut command = Command::new("git");
    command
        .args(["clone", "--no-checkout", "--quiet", url])
        .arg(target_dir);
    let output = run("clone", command)?;
    if !output.status.success() {
        return Err(classify_failure("clone", url, reference, &combined_output(&output)));
    }

    checkout(target_dir, url, reference, &[reference])
}

/// Return the nearest tag reachable from `HEAD`, if any.
pub fn describe_tag(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .current_dir(dir)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

/// Discard every local modification in `dir`: reset tracked files, restore
/// the working tree and delete untracked files.
pub fn reset_hard(dir: &Path) -> Result<(), FetchError> {
    for args in [
        &["reset", "HEAD", "--hard", "--quiet"][..],
        &["checkout", "--quiet", "."][..],
        &["clean", "-fdq"][..],
    ] {
        let mut command = Command::new("git");
        command.args(args).current_dir(dir);
        let output = run(args[0], command)?;
        if !output.status.success() {
            return Err(FetchError::Command {
                command: args[0].to_string(),
                message: combined_output(&output).trim().to_string(),
            });
        }
    }
    Ok(())
}

/// Fetch `reference` (and tags) from `origin` and check out the fetched
/// commit on a detached HEAD.
///
/// `FETCH_HEAD` is checked out rather than `reference` itself: for a branch,
/// the local branch of that name still points at the commit of the last run.
pub fn fetch_checkout(dir: &Path, url: &str, reference: &str) -> Result<(), FetchError> {
    let mut command = Command::new("git");
    command
        .args(["fetch", "--quiet", "--tags", "origin", reference])
        .current_dir(dir);
    let output = run("fetch", command)?;
    if !output.status.success() {
        return Err(classify_failure("fetch", url, reference, &combined_output(&output)));
    }

    checkout(dir, url, reference, &["--detach", "FETCH_HEAD"])
}

fn checkout(dir: &Path, url: &str, reference: &str, revision: &[&str]) -> Result<(), FetchError> {
    let mut command = Command::new("git");
    command
        .args(["checkout", "--quiet"])
        .args(revision)
        .current_dir(dir);
    let output = run("checkout", command)?;
    if !output.status.success() {
        return Err(FetchError::RefNotFound {
            url: url.to_string(),
            reference: reference.to_string(),
        });
    }
    Ok(())
}

fn run(name: &str, mut command: Command) -> Result<Output, FetchError> {
    debug!("Running git {}: {:?}", name, command);
    command.output().map_err(|e| FetchError::Command {
        command: name.to_string(),
        message: e.to_string(),
    })
}

fn combined_output(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Map git's output for a failed command to a [`FetchError`].
///
/// Git's wording differs between versions and hosting services, so this is a
/// best-effort match; anything unrecognized is reported verbatim.
pub fn classify_failure(command: &str, url: &str, reference: &str, output: &str) -> FetchError {
    static REF_MISSING: OnceLock<Regex> = OnceLock::new();
    static REPO_MISSING: OnceLock<Regex> = OnceLock::new();

    let ref_missing = REF_MISSING.get_or_init(|| {
        Regex::new(
            r"(?i)(couldn't find remote ref|remote branch .* not found in upstream|pathspec .* did not match|unknown revision)",
        )
        .expect("valid ref-missing regex")
    });
    let repo_missing = REPO_MISSING.get_or_init(|| {
        Regex::new(
            r"(?i)(repository .*not found|does not appear to be a git repository|could not read from remote repository|not found)",
        )
        .expect("valid repo-missing regex")
    });

    if ref_missing.is_match(output) {
        FetchError::RefNotFound {
            url: url.to_string(),
            reference: reference.to_string(),
        }
    } else if repo_missing.is_match(output) {
        FetchError::RepositoryNotFound {
            url: url.to_string(),
        }
    } else {
        FetchError::Command {
            command: command.to_string(),
            message: output.trim().to_string(),
        }
    }
}
