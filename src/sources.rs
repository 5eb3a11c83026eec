//! Source file collection.
//!
//! Expands a seed's file patterns against its checkout directory. Patterns
//! are matched against paths relative to the checkout, so `**/*.swift`
//! selects every Swift file in the seed and `Sources/*.h` only the headers
//! directly under `Sources/`.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::evaluator::Seed;
use crate::path::{compile_patterns, MATCH_OPTIONS};

/// Absolute paths of every source file, keyed by seed name.
pub type SourceFileSet = BTreeMap<String, Vec<PathBuf>>;

/// Extensions that are referenced from the project but never compiled.
const HEADER_EXTENSIONS: [&str; 4] = ["h", "hh", "hpp", "hxx"];

/// Whether `path` names a header file.
pub fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            HEADER_EXTENSIONS
                .iter()
                .any(|header| header.eq_ignore_ascii_case(extension))
        })
}

/// Collect the files of `seed` from its checkout at `dir`.
///
/// Files are returned in directory-walk order, pattern by pattern, each file
/// at most once. Patterns that match nothing contribute nothing.
pub fn collect(seed: &Seed, dir: &Path) -> Result<Vec<PathBuf>> {
    let includes = compile_all(&seed.files)?;
    let excludes = compile_all(&seed.exclude_files)?;
    let candidates = walk(dir);

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for group in &includes {
        for relative in &candidates {
            if !matches_any(group, relative) || seen.contains(relative) {
                continue;
            }
            if excludes.iter().any(|exclude| matches_any(exclude, relative)) {
                continue;
            }
            seen.insert(relative.clone());
            files.push(dir.join(relative));
        }
    }

    debug!("Collected {} files for {}", files.len(), seed.name);
    Ok(files)
}

fn compile_all(patterns: &[String]) -> Result<Vec<Vec<Pattern>>> {
    patterns.iter().map(|pattern| compile_patterns(pattern)).collect()
}

fn matches_any(patterns: &[Pattern], relative: &Path) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern.matches_path_with(relative, MATCH_OPTIONS))
}

/// Every regular file under `dir`, relative to it, skipping `.git`.
fn walk(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != ".git")
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .ok()
                .map(Path::to_path_buf)
        })
        .collect()
}
