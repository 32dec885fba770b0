//! Git repository operations.
//!
//! Used when the CLI lints a local revision range instead of a document
//! supplied by a CI integration, and to manage the `commit-msg` hook.

use crate::core::commit::{Commit, DiffStats};
use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Represents a Git repository.
#[derive(Debug, Clone)]
pub struct GitRepo {
    /// Root directory of the repository (where .git is).
    root: PathBuf,
    /// Path to the .git directory (or file for worktrees).
    git_dir: PathBuf,
}

impl GitRepo {
    /// Discovers the Git repository from the current directory.
    pub fn discover() -> Result<Self> {
        Self::discover_from(&std::env::current_dir().map_err(|e| Error::io("get current dir", e))?)
    }

    /// Discovers the Git repository from a specific path.
    pub fn discover_from(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel", "--git-dir"])
            .current_dir(path)
            .output()
            .map_err(|e| Error::io("run git rev-parse", e))?;

        if !output.status.success() {
            return Err(Error::NotGitRepo);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut lines = stdout.lines();

        let root = lines.next().map(PathBuf::from).ok_or(Error::NotGitRepo)?;

        let git_dir = lines
            .next()
            .map(|s| {
                let p = PathBuf::from(s);
                if p.is_absolute() {
                    p
                } else {
                    root.join(p)
                }
            })
            .ok_or(Error::NotGitRepo)?;

        Ok(Self { root, git_dir })
    }

    /// Returns the root directory of the repository.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .git directory path.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Returns the hooks directory path.
    #[must_use]
    pub fn hooks_dir(&self) -> PathBuf {
        // core.hooksPath wins over .git/hooks
        if let Ok(path) = self.git(&["config", "--get", "core.hooksPath"], "config") {
            if !path.is_empty() {
                let hooks_path = PathBuf::from(&path);
                if hooks_path.is_absolute() {
                    return hooks_path;
                }
                return self.root.join(hooks_path);
            }
        }

        self.git_dir.join("hooks")
    }

    /// Returns the path to a specific hook.
    #[must_use]
    pub fn hook_path(&self, hook_name: &str) -> PathBuf {
        self.hooks_dir().join(hook_name)
    }

    /// Returns the commits reachable from `head` but not from `base`, oldest first.
    pub fn commits_in_range(&self, base: &str, head: &str) -> Result<Vec<Commit>> {
        let range = format!("{base}..{head}");
        let ids = self.git(&["rev-list", "--reverse", &range], "rev-list")?;

        let commits = ids
            .lines()
            .filter(|id| !id.is_empty())
            .map(|id| self.commit(id))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(range = %range, count = commits.len(), "Collected commits");
        Ok(commits)
    }

    /// Reads a single commit's message and diff statistics.
    pub fn commit(&self, id: &str) -> Result<Commit> {
        let message = self.git(&["log", "-1", "--format=%B", id], "log")?;
        let numstat = self.git(
            &["show", "--numstat", "--format=", "--no-renames", id],
            "show",
        )?;

        Ok(Commit::new(id, message, parse_numstat(&numstat)))
    }

    /// Runs git and returns trimmed stdout, or an error carrying stderr.
    fn git(&self, args: &[&str], operation: &str) -> Result<String> {
        let output: Output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| Error::io(format!("run git {operation}"), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::git(operation, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

/// Sums `git show --numstat` output. Binary files count as changed files with no lines.
fn parse_numstat(numstat: &str) -> DiffStats {
    numstat
        .lines()
        .filter(|line| !line.trim().is_empty())
        .fold(DiffStats::default(), |mut stats, line| {
            let mut fields = line.split('\t');
            let added = fields.next().and_then(|n| n.parse::<usize>().ok());
            let removed = fields.next().and_then(|n| n.parse::<usize>().ok());

            stats.files_changed += 1;
            stats.lines_changed += added.unwrap_or(0) + removed.unwrap_or(0);
            stats
        })
}
