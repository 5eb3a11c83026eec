//! # Manifest Evaluation
//!
//! Evaluating a manifest produces the *desired state* of a run: which seeds
//! should be installed at which refs, and which build targets each seed must
//! be compiled into.
//!
//! Evaluation goes through [`ManifestBuilder`], which exposes the two verbs a
//! manifest can use:
//!
//! - `target(names, block)` runs `block` with the named targets as the
//!   current context. The context is an explicit field of the builder; it is
//!   replaced for the duration of the block and restored afterwards.
//! - `dependency(identifier, ref, options)` declares one seed and binds it to
//!   the current context. An empty context binds the seed to every target the
//!   project had when evaluation started.
//!
//! Declaring the same seed twice keeps the last declaration and unions the
//! target bindings of both.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::defaults::DEFAULT_FILE_PATTERN;
use crate::error::{Error, Result};
use crate::manifest::{Declaration, Manifest, SeedOptions};
use crate::path::{compile_patterns, is_plain_name};

/// A declared dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// Unique key, derived from the repository identity.
    pub name: String,
    pub url: String,
    /// Opaque git ref: tag, branch or commit.
    pub version: String,
    /// Glob patterns, relative to the seed's checkout.
    pub files: Vec<String>,
    /// Glob patterns removing files from the selection.
    pub exclude_files: Vec<String>,
}

/// The desired state of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredState {
    /// Seeds keyed by name.
    pub seeds: BTreeMap<String, Seed>,
    /// Seed name to the build targets it must be compiled into.
    pub bindings: BTreeMap<String, BTreeSet<String>>,
}

/// Accumulates the desired state while a manifest is evaluated.
#[derive(Debug)]
pub struct ManifestBuilder {
    project_targets: Vec<String>,
    current_targets: Vec<String>,
    state: DesiredState,
}

impl ManifestBuilder {
    /// Create a builder for a project that has `project_targets`.
    pub fn new<S: AsRef<str>>(project_targets: &[S]) -> Self {
        Self {
            project_targets: project_targets
                .iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
            current_targets: Vec::new(),
            state: DesiredState::default(),
        }
    }

    /// Run `block` with `names` as the current target context.
    ///
    /// Fails with [`Error::UnknownTarget`] if any name is not a target of the
    /// project.
    pub fn target<S, F>(&mut self, names: &[S], block: F) -> Result<()>
    where
        S: AsRef<str>,
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut scoped = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !self.project_targets.iter().any(|target| target == name) {
                return Err(Error::UnknownTarget {
                    name: name.to_string(),
                    available: self.project_targets.clone(),
                });
            }
            scoped.push(name.to_string());
        }

        let outer = std::mem::replace(&mut self.current_targets, scoped);
        let result = block(self);
        self.current_targets = outer;
        result
    }

    /// Declare a GitHub-hosted seed, identified as `owner/repo`.
    pub fn dependency(
        &mut self,
        identifier: &str,
        version: &str,
        options: SeedOptions,
    ) -> Result<()> {
        let segments: Vec<&str> = identifier.split('/').collect();
        if segments.len() != 2 || segments.iter().any(|segment| !is_plain_name(segment.trim())) {
            return Err(Error::MalformedIdentifier {
                identifier: identifier.to_string(),
            });
        }
        let name = segments[1].trim().to_string();
        let url = format!(
            "https://github.com/{}/{}",
            segments[0].trim(),
            segments[1].trim()
        );
        self.declare(name, url, version, options)
    }

    /// Declare a seed from an arbitrary git URL.
    ///
    /// The seed is named after the last path segment of the URL, without a
    /// trailing `.git`. A URL that yields no usable directory name, such as
    /// one ending in `..`, is rejected.
    pub fn git_dependency(&mut self, url: &str, version: &str, options: SeedOptions) -> Result<()> {
        let name = seed_name_from_url(url).ok_or_else(|| Error::MalformedIdentifier {
            identifier: url.to_string(),
        })?;
        self.declare(name, url.to_string(), version, options)
    }

    /// Finish evaluation and return the desired state.
    pub fn finish(self) -> DesiredState {
        self.state
    }

    fn declare(
        &mut self,
        name: String,
        url: String,
        version: &str,
        options: SeedOptions,
    ) -> Result<()> {
        let files = options
            .files
            .map(|files| files.into_vec())
            .unwrap_or_else(|| vec![DEFAULT_FILE_PATTERN.to_string()]);
        let exclude_files = options
            .exclude_files
            .map(|files| files.into_vec())
            .unwrap_or_default();

        for pattern in files.iter().chain(exclude_files.iter()) {
            compile_patterns(pattern)?;
        }

        let targets = if self.current_targets.is_empty() {
            &self.project_targets
        } else {
            &self.current_targets
        };
        debug!("Declared seed {} ({}) for targets {:?}", name, version, targets);

        self.state
            .bindings
            .entry(name.clone())
            .or_default()
            .extend(targets.iter().cloned());
        self.state.seeds.insert(
            name.clone(),
            Seed {
                name,
                url,
                version: version.to_string(),
                files,
                exclude_files,
            },
        );
        Ok(())
    }

    fn apply(&mut self, declarations: &[Declaration]) -> Result<()> {
        for declaration in declarations {
            match declaration {
                Declaration::Github { github } => {
                    self.dependency(&github.repo, &github.r#ref, github.options.clone())?
                }
                Declaration::Git { git } => {
                    self.git_dependency(&git.url, &git.r#ref, git.options.clone())?
                }
                Declaration::Target { target } => {
                    let names = target.names.clone().into_vec();
                    self.target(&names, |builder| builder.apply(&target.with))?
                }
            }
        }
        Ok(())
    }
}

/// Evaluate `manifest` against a project that has `project_targets`.
pub fn evaluate<S: AsRef<str>>(manifest: &Manifest, project_targets: &[S]) -> Result<DesiredState> {
    let mut builder = ManifestBuilder::new(project_targets);
    builder.apply(manifest)?;
    Ok(builder.finish())
}

/// Derive a seed name from a git URL (`https://host/owner/Repo.git` or
/// `git@host:owner/Repo.git`).
pub fn seed_name_from_url(url: &str) -> Option<String> {
    let path = match url::Url::parse(url) {
        Ok(parsed) if parsed.has_host() || parsed.scheme() == "file" => parsed.path().to_string(),
        // scp-like syntax: user@host:path
        _ => url.split_once(':').map_or(url, |(_, path)| path).to_string(),
    };
    let last = path.trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if is_plain_name(name) {
        Some(name.to_string())
    } else {
        None
    }
}
