//! Shared test utilities for integration and E2E tests.
//!
//! Provides a project fixture (a temp directory holding a `*.seedproj`
//! document and a `Seedfile`) and [`MockRemote`], an in-process stand-in for
//! git that serves fixed file trees per `(url, ref)`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let remote = MockRemote::new().with_release(WIDGET_URL, "1.2.0", &[("Sources/A.swift", "")]);
//! let fixture = TestFixture::new(&["App"]).with_seedfile(manifests::WIDGET);
//! let report = fixture.install(&remote).unwrap();
//! ```

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use assert_fs::prelude::*;
use seeds::error::FetchError;
use seeds::phases::{self, environment, Environment, InstallReport};
use seeds::project::{MemoryProject, ProjectGraph};
use seeds::repository::{GitOperations, RepositoryManager};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::{MockRemote, TestFixture};
    #[allow(unused_imports)]
    pub use super::{GADGET_URL, WIDGET_URL};
}

pub const WIDGET_URL: &str = "https://github.com/acme/Widget";
pub const GADGET_URL: &str = "https://github.com/acme/Gadget";

/// Common `Seedfile` snippets.
pub mod manifests {
    /// Widget 1.2.0, Swift files only, compiled into App.
    pub const WIDGET: &str = r#"
- target:
    names: App
    with:
      - github:
          repo: acme/Widget
          ref: "1.2.0"
          files: "**/*.swift"
"#;

    /// Same as [`WIDGET`] at 1.3.0.
    pub const WIDGET_1_3: &str = r#"
- target:
    names: App
    with:
      - github:
          repo: acme/Widget
          ref: "1.3.0"
          files: "**/*.swift"
"#;

    /// Widget for App, Gadget (default patterns) for every target.
    pub const WIDGET_AND_GADGET: &str = r#"
- github:
    repo: acme/Gadget
    ref: v2
- target:
    names: App
    with:
      - github:
          repo: acme/Widget
          ref: "1.2.0"
          files: "**/*.swift"
"#;

    /// Only Gadget.
    pub const GADGET: &str = r#"
- github:
    repo: acme/Gadget
    ref: v2
"#;
}

/// A fake remote: every `(url, ref)` maps to a file tree.
///
/// Checkouts record their ref in `.git/TAG`, which `describe_tag` reads back.
#[derive(Clone, Default)]
pub struct MockRemote {
    releases: BTreeMap<(String, String), Vec<(String, String)>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `files` (path, content) as `reference` of `url`.
    pub fn with_release(mut self, url: &str, reference: &str, files: &[(&str, &str)]) -> Self {
        self.releases.insert(
            (url.to_string(), reference.to_string()),
            files
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
        );
        self
    }

    /// Every git call made so far, e.g. `clone <url> <ref>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn release(&self, url: &str, reference: &str) -> Result<&Vec<(String, String)>, FetchError> {
        if !self.releases.keys().any(|(known, _)| known == url) {
            return Err(FetchError::RepositoryNotFound {
                url: url.to_string(),
            });
        }
        self.releases
            .get(&(url.to_string(), reference.to_string()))
            .ok_or_else(|| FetchError::RefNotFound {
                url: url.to_string(),
                reference: reference.to_string(),
            })
    }

    fn check_out(dir: &Path, reference: &str, files: &[(String, String)]) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.file_name().is_some_and(|name| name == ".git") {
                continue;
            }
            if path.is_dir() {
                fs::remove_dir_all(&path).unwrap();
            } else {
                fs::remove_file(&path).unwrap();
            }
        }
        for (relative, content) in files {
            let path = dir.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        fs::create_dir_all(dir.join(".git")).unwrap();
        fs::write(dir.join(".git/TAG"), reference).unwrap();
    }
}

impl GitOperations for MockRemote {
    fn clone_repository(
        &self,
        url: &str,
        reference: &str,
        target_dir: &Path,
    ) -> Result<(), FetchError> {
        self.record(format!("clone {} {}", url, reference));
        let files = self.release(url, reference)?;
        fs::create_dir_all(target_dir).unwrap();
        Self::check_out(target_dir, reference, files);
        Ok(())
    }

    fn describe_tag(&self, dir: &Path) -> Option<String> {
        self.record(format!("describe {}", dir.file_name()?.to_string_lossy()));
        fs::read_to_string(dir.join(".git/TAG"))
            .ok()
            .map(|tag| tag.trim().to_string())
    }

    fn reset_hard(&self, dir: &Path) -> Result<(), FetchError> {
        self.record(format!(
            "reset {}",
            dir.file_name().unwrap_or_default().to_string_lossy()
        ));
        Ok(())
    }

    fn fetch_checkout(&self, dir: &Path, url: &str, reference: &str) -> Result<(), FetchError> {
        self.record(format!("fetch {} {}", url, reference));
        let files = self.release(url, reference)?;
        Self::check_out(dir, reference, files);
        Ok(())
    }
}

/// A project root with a `App.seedproj` document and optional `Seedfile`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a project whose document declares `targets`.
    pub fn new(targets: &[&str]) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let mut project = MemoryProject::new(temp_dir.path());
        for target in targets {
            project.add_target(target);
        }
        project.set_path(temp_dir.path().join("App.seedproj"));
        project.save().expect("Failed to write project");
        Self { temp_dir }
    }

    /// Write the `Seedfile`.
    pub fn with_seedfile(self, content: &str) -> Self {
        self.set_seedfile(content);
        self
    }

    /// Replace the `Seedfile` of an existing fixture.
    pub fn set_seedfile(&self, content: &str) {
        self.temp_dir
            .child("Seedfile")
            .write_str(content)
            .expect("Failed to write Seedfile");
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    pub fn project_path(&self) -> PathBuf {
        self.path().join("App.seedproj")
    }

    pub fn env(&self) -> Environment {
        environment::execute(self.path(), None).expect("Failed to prepare environment")
    }

    /// Run the install pipeline with `remote` standing in for git.
    pub fn install(&self, remote: &MockRemote) -> seeds::error::Result<InstallReport> {
        let env = self.env();
        let manager =
            RepositoryManager::with_operations(Box::new(remote.clone()), env.seeds_dir.clone());
        phases::execute_install(&env, &manager)
    }

    /// The saved project document.
    pub fn project(&self) -> MemoryProject {
        MemoryProject::open(&self.project_path()).expect("Failed to open project")
    }

    pub fn project_json(&self) -> String {
        fs::read_to_string(self.project_path()).expect("Failed to read project")
    }

    pub fn lock(&self) -> String {
        fs::read_to_string(self.path().join("Seedfile.lock")).expect("Failed to read lock")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("seeds");
        cmd.current_dir(self.path());
        cmd.env_remove("SEEDS_ROOT");
        cmd
    }
}
