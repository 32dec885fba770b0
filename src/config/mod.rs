//! Configuration handling for pr-commit-lint.
//!
//! This module provides configuration loading and validation,
//! supporting both `pr-commit-lint.toml` files and sensible defaults.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "pr-commit-lint.toml";

/// Commit types accepted by default.
pub const DEFAULT_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// Message prefixes of generated commits that are never linted.
pub const DEFAULT_IGNORED_PREFIXES: &[&str] =
    &["Merge branch", "Revert \"", "chore: update snapshots"];

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule thresholds and vocabularies.
    pub rules: RulesConfig,
    /// Report settings.
    pub report: ReportConfig,
}

impl Config {
    /// Loads configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::find_config_file()?;
        Self::load_from(&path)
    }

    /// Loads configuration or returns defaults if not found.
    pub fn load_or_default() -> Result<Self> {
        match Self::find_config_file() {
            Ok(path) => Self::load_from(&path),
            Err(Error::ConfigNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io("read config", e))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config_parse_with_source("Failed to parse TOML", e))?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Finds the configuration file by searching up the directory tree.
    pub fn find_config_file() -> Result<PathBuf> {
        let cwd = std::env::current_dir().map_err(|e| Error::io("get current dir", e))?;
        Self::find_config_file_from(&cwd)
    }

    /// Finds the configuration file starting at `start`.
    pub fn find_config_file_from(start: &Path) -> Result<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.exists())
            .ok_or_else(|| Error::ConfigNotFound {
                path: start.join(CONFIG_FILE_NAME),
            })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let rules = &self.rules;

        for (field, value) in [
            ("rules.max_subject_length", rules.max_subject_length),
            ("rules.max_body_line_length", rules.max_body_line_length),
            ("rules.max_commits", rules.max_commits),
        ] {
            if value == 0 {
                return Err(Error::config_invalid(field, "must be greater than zero"));
            }
        }

        if rules.types.is_empty() {
            return Err(Error::config_invalid("rules.types", "must not be empty"));
        }

        if let Some(bad) = rules
            .types
            .iter()
            .find(|t| t.is_empty() || !t.chars().all(|c| c.is_alphanumeric() || c == '_'))
        {
            return Err(Error::config_invalid(
                "rules.types",
                format!("'{bad}' is not a single word"),
            ));
        }

        if rules.ignored_prefixes.iter().any(String::is_empty) {
            return Err(Error::config_invalid(
                "rules.ignored_prefixes",
                "empty prefix would ignore every commit",
            ));
        }

        Ok(())
    }

    /// Generates default configuration as a string.
    #[must_use]
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Thresholds and vocabularies used by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Longest allowed subject, in characters.
    pub max_subject_length: usize,
    /// Longest allowed body line, in characters, not counting URLs.
    pub max_body_line_length: usize,
    /// A commit touching more files than this is a large change...
    pub large_diff_files: usize,
    /// ...when it also changes at least this many lines.
    pub large_diff_lines: usize,
    /// A pull request with more commits than this gets a rebase hint.
    pub max_commits: usize,
    /// Commits whose message starts with any of these are skipped.
    pub ignored_prefixes: Vec<String>,
    /// Accepted conventional-commit types.
    pub types: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_subject_length: 72,
            max_body_line_length: 144,
            large_diff_files: 10,
            large_diff_lines: 100,
            max_commits: 10,
            ignored_prefixes: DEFAULT_IGNORED_PREFIXES
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            types: DEFAULT_TYPES.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl RulesConfig {
    /// Returns true if `kind` is an accepted commit type.
    #[must_use]
    pub fn is_known_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }

    /// Returns true if `message` starts with an ignored prefix.
    #[must_use]
    pub fn is_ignored(&self, message: &str) -> bool {
        self.ignored_prefixes
            .iter()
            .any(|prefix| message.starts_with(prefix.as_str()))
    }
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Link included in the failure summary.
    pub docs_url: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            docs_url: "https://www.conventionalcommits.org/en/v1.0.0/".to_string(),
        }
    }
}
