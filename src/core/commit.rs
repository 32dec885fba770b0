//! Commit and pull request data handed to the linter.
//!
//! These records are produced by a CI integration (a JSON document) or read
//! from a local repository by [`GitRepo`](crate::core::git::GitRepo). The
//! linter never mutates them.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Diff statistics of a commit relative to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffStats {
    /// Number of files touched.
    pub files_changed: usize,
    /// Lines added plus lines removed.
    pub lines_changed: usize,
}

/// A single commit of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash.
    #[serde(alias = "sha")]
    pub id: String,
    /// Full message: subject, optional blank line, optional body.
    pub message: String,
    /// Diff statistics.
    #[serde(default)]
    pub stats: DiffStats,
}

impl Commit {
    /// Creates a commit record.
    pub fn new(id: impl Into<String>, message: impl Into<String>, stats: DiffStats) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            stats,
        }
    }

    /// Returns the abbreviated commit hash used in diagnostics.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id
            .char_indices()
            .nth(8)
            .map_or(self.id.as_str(), |(idx, _)| &self.id[..idx])
    }

    /// Returns the first line of the message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.parts().subject
    }

    /// Splits the message into subject, separator and details.
    #[must_use]
    pub fn parts(&self) -> MessageParts<'_> {
        MessageParts::split(&self.message)
    }
}

/// Pull request metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    /// Pull request title.
    pub title: String,
    /// Whether the pull request will be squash merged.
    pub squash: bool,
}

/// Everything a lint run needs, as supplied by a CI integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintInput {
    /// Pull request descriptor.
    pub pull_request: PullRequest,
    /// Commits in merge order, oldest first.
    pub commits: Vec<Commit>,
}

impl LintInput {
    /// Reads a JSON input document from a file, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| Error::io("read stdin", e))?;
            buf
        } else {
            std::fs::read_to_string(path)
                .map_err(|e| Error::io(format!("read {}", path.display()), e))?
        };

        Self::from_json(&content)
    }

    /// Parses a JSON input document.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::input("Failed to parse JSON", e))
    }
}

/// A commit message split on its first two newlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageParts<'a> {
    /// First line.
    pub subject: &'a str,
    /// Second line, which must be blank when present.
    pub separator: Option<&'a str>,
    /// Everything after the second line. `None` when absent or blank.
    pub details: Option<&'a str>,
}

impl<'a> MessageParts<'a> {
    /// Splits `message` into its parts.
    #[must_use]
    pub fn split(message: &'a str) -> Self {
        let mut parts = message.splitn(3, '\n');
        let subject = parts.next().unwrap_or_default();
        let separator = parts.next();
        let details = parts.next().filter(|d| !d.trim().is_empty());

        Self {
            subject,
            separator,
            details,
        }
    }
}
