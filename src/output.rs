//! # Output Configuration
//!
//! Controls how the CLI reports an install: emoji or plain markers, styled or
//! plain seed names.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust
//! use seeds::output::{emoji, OutputConfig};
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! assert_eq!(emoji(&config, "✅", "[OK]"), "[OK]");
//! ```

use std::env;

use console::style;

use crate::error::FetchError;
use crate::repository::SyncOutcome;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: "always" and "never" force the
    /// choice, anything else detects it from the environment. In auto mode
    /// colors are off when `NO_COLOR` is set, `CLICOLOR=0`, `TERM=dumb`, or
    /// stdout is not a TTY (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// A seed name, bold when colors are enabled.
pub fn seed_name(config: &OutputConfig, name: &str) -> String {
    if config.use_color {
        style(name).bold().to_string()
    } else {
        name.to_string()
    }
}

/// One status line for a synced seed, e.g. `[OK] Widget 1.2.0 (cloned, 3 files)`.
pub fn sync_line(
    config: &OutputConfig,
    name: &str,
    version: &str,
    outcome: &Result<SyncOutcome, FetchError>,
    files: usize,
) -> String {
    let (marker, detail) = match outcome {
        Ok(SyncOutcome::Cloned) => (emoji(config, "📥", "[NEW]"), "cloned".to_string()),
        Ok(SyncOutcome::Updated { previous: Some(previous) }) => (
            emoji(config, "🔄", "[UPD]"),
            format!("updated from {}", previous),
        ),
        Ok(SyncOutcome::Updated { previous: None }) => {
            (emoji(config, "🔄", "[UPD]"), "updated".to_string())
        }
        Ok(SyncOutcome::UpToDate) => (emoji(config, "✅", "[OK]"), "up to date".to_string()),
        Err(error) => (emoji(config, "⚠️", "[WARN]"), error.to_string()),
    };
    format!(
        "{} {} {} ({}, {} {})",
        marker,
        seed_name(config, name),
        version,
        detail,
        files,
        if files == 1 { "file" } else { "files" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("NEVER");
        assert!(!config.use_color);
    }

    #[test]
    fn test_emoji_helper() {
        assert_eq!(emoji(&OutputConfig::with_color(), "✅", "[OK]"), "✅");
        assert_eq!(emoji(&OutputConfig::without_color(), "✅", "[OK]"), "[OK]");
    }

    #[test]
    fn test_sync_line_plain() {
        let config = OutputConfig::without_color();
        assert_eq!(
            sync_line(&config, "Widget", "1.2.0", &Ok(SyncOutcome::Cloned), 3),
            "[NEW] Widget 1.2.0 (cloned, 3 files)"
        );
        assert_eq!(
            sync_line(
                &config,
                "Widget",
                "1.3.0",
                &Ok(SyncOutcome::Updated {
                    previous: Some("1.2.0".to_string())
                }),
                1
            ),
            "[UPD] Widget 1.3.0 (updated from 1.2.0, 1 file)"
        );
    }

    #[test]
    fn test_sync_line_failure() {
        let config = OutputConfig::without_color();
        let outcome = Err(FetchError::RepositoryNotFound {
            url: "https://github.com/acme/Ghost".to_string(),
        });
        let line = sync_line(&config, "Ghost", "1.0.0", &outcome, 0);
        assert!(line.starts_with("[WARN] Ghost 1.0.0 ("));
        assert!(line.ends_with(", 0 files)"));
    }
}
