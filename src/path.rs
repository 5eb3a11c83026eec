//! Path and pattern utilities for seeds

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Options used for every file pattern match: `*` never crosses a directory
/// separator, `**/` spans any number of directories.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expand `{a,b}` alternations into the list of plain glob patterns.
///
/// Alternations may repeat and nest. Unbalanced braces are kept literally.
///
/// # Examples
///
/// ```
/// use seeds::path::expand_braces;
///
/// assert_eq!(
///     expand_braces("**/*.{h,m}"),
///     vec!["**/*.h".to_string(), "**/*.m".to_string()]
/// );
/// ```
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (offset, ch) in pattern[open..].char_indices() {
        let index = open + offset;
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(index);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(index),
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(splits);
    bounds.push(close);

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let alternative = &pattern[window[0] + 1..window[1]];
        let candidate = format!("{}{}{}", prefix, alternative, suffix);
        expanded.extend(expand_braces(&candidate));
    }
    expanded
}

/// Compile a user-supplied file pattern, expanding alternations first.
pub fn compile_patterns(pattern: &str) -> Result<Vec<Pattern>> {
    expand_braces(pattern)
        .iter()
        .map(|expanded| {
            Pattern::new(expanded).map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.msg.to_string(),
            })
        })
        .collect()
}

/// Match a relative path against a user-supplied pattern
pub fn glob_match(pattern: &str, path: &Path) -> Result<bool> {
    Ok(compile_patterns(pattern)?
        .iter()
        .any(|compiled| compiled.matches_path_with(path, MATCH_OPTIONS)))
}

/// Render a path with `/` separators regardless of platform.
///
/// Used to build identifier keys, which must not depend on the host OS.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::RootDir => Some(String::new()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether `name` can be used as a single directory under `Seeds/`.
///
/// Rejects empty names, `.` and `..`, and anything holding a path separator.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Express `path` relative to `base` when it lives underneath it.
pub fn relative_to(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) => to_slash(relative),
        Err(_) => to_slash(path),
    }
}
