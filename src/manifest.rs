//! # Manifest Schema and Parsing
//!
//! This module defines the data structures that represent the `Seedfile`
//! manifest and the logic for parsing it. A manifest is a YAML sequence of
//! declarations, evaluated in order:
//!
//! ```yaml
//! - github:
//!     repo: acme/Widget
//!     ref: 1.2.0
//!     files: "Sources/**/*.swift"
//! - target:
//!     names: [App, AppTests]
//!     with:
//!       - git:
//!           url: https://gitlab.com/acme/Gadget.git
//!           ref: v2
//! ```
//!
//! Parsing only checks the shape of the document. Turning the declarations
//! into a desired state (validating identifiers, targets and patterns) is the
//! job of the [`evaluator`](crate::evaluator).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The parsed manifest: declarations in source order.
pub type Manifest = Vec<Declaration>;

/// One or more strings; a single string is normalized into a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Options shared by every dependency declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOptions {
    /// Glob patterns selecting the seed's source files.
    #[serde(default)]
    pub files: Option<OneOrMany>,
    /// Glob patterns removing files from the selection.
    #[serde(default)]
    pub exclude_files: Option<OneOrMany>,
}

/// A dependency hosted on GitHub, addressed as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubDecl {
    pub repo: String,
    /// Tag, branch or commit to check out.
    pub r#ref: String,
    #[serde(flatten)]
    pub options: SeedOptions,
}

/// A dependency addressed by an arbitrary git URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitDecl {
    pub url: String,
    /// Tag, branch or commit to check out.
    pub r#ref: String,
    #[serde(flatten)]
    pub options: SeedOptions,
}

/// Scopes nested declarations to a set of build targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDecl {
    pub names: OneOrMany,
    #[serde(default)]
    pub with: Vec<Declaration>,
}

/// All declaration kinds a manifest may contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Declaration {
    /// Declare a GitHub-hosted seed.
    Github { github: GithubDecl },
    /// Declare a seed from any git URL.
    Git { git: GitDecl },
    /// Bind the nested declarations to the named targets.
    Target { target: TargetDecl },
}

/// Parse manifest text.
///
/// An empty document is a valid manifest with no declarations.
pub fn parse(yaml_content: &str) -> Result<Manifest> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    if !value.is_sequence() {
        return Err(Error::ManifestParse {
            message: "the manifest must be a list of declarations".to_string(),
            hint: Some("start each declaration with '- github:', '- git:' or '- target:'".to_string()),
        });
    }
    serde_yaml::from_value(value).map_err(|e| Error::ManifestParse {
        message: e.to_string(),
        hint: Some(
            "each entry needs 'github' (repo, ref), 'git' (url, ref) or 'target' (names, with); \
             quote refs that look like numbers, e.g. ref: \"2.0\""
                .to_string(),
        ),
    })
}

/// Parse the manifest at `path`.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_declaration() {
        let manifest = parse(
            r#"
- github:
    repo: acme/Widget
    ref: 1.2.0
    files: "**/*.swift"
"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 1);
        match &manifest[0] {
            Declaration::Github { github } => {
                assert_eq!(github.repo, "acme/Widget");
                assert_eq!(github.r#ref, "1.2.0");
                assert_eq!(
                    github.options.files,
                    Some(OneOrMany::One("**/*.swift".to_string()))
                );
                assert_eq!(github.options.exclude_files, None);
            }
            other => panic!("expected github declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_numeric_looking_ref_stays_string() {
        let manifest = parse("- github: { repo: acme/Widget, ref: \"2.0\" }").unwrap();
        match &manifest[0] {
            Declaration::Github { github } => assert_eq!(github.r#ref, "2.0"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_targets() {
        let manifest = parse(
            r#"
- target:
    names: [App, AppTests]
    with:
      - git:
          url: https://gitlab.com/acme/Gadget.git
          ref: v2
          files: ["Sources/*.h", "Sources/*.m"]
      - target:
          names: AppTests
          with:
            - github: { repo: acme/Mock, ref: main }
"#,
        )
        .unwrap();

        let Declaration::Target { target } = &manifest[0] else {
            panic!("expected target block");
        };
        assert_eq!(
            target.names.clone().into_vec(),
            vec!["App".to_string(), "AppTests".to_string()]
        );
        assert_eq!(target.with.len(), 2);
        assert!(matches!(target.with[0], Declaration::Git { .. }));
        assert!(matches!(target.with[1], Declaration::Target { .. }));
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# nothing yet\n").unwrap().is_empty());
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_mapping_root() {
        let err = parse("github: acme/Widget").unwrap_err();
        assert!(matches!(err, Error::ManifestParse { hint: Some(_), .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_declaration() {
        let err = parse("- svn: { url: x, ref: y }").unwrap_err();
        assert!(err.to_string().contains("Manifest parsing error"));
    }

    #[test]
    fn test_parse_rejects_missing_ref() {
        assert!(parse("- github: { repo: acme/Widget }").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_file("/nonexistent/Seedfile").unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }

    #[test]
    fn test_one_or_many_into_vec() {
        assert_eq!(OneOrMany::One("a".into()).into_vec(), vec!["a".to_string()]);
        assert_eq!(
            OneOrMany::Many(vec!["a".into(), "b".into()]).into_vec(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
