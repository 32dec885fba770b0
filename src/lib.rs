//! # pr-commit-lint
//!
//! Conventional-commit linting for pull requests.
//!
//! Given the commits of a pull request and its title, `pr-commit-lint` checks
//! every commit message against a fixed rule set and reports blocking failures
//! and advisory warnings. The CI job decides the build status from the report.
//!
//! ## Rules
//!
//! - Subjects are at most 72 characters, do not end with a period and follow
//!   `type(scope): description` with a well-known type
//! - Subject and body are separated by a blank line; body lines are at most
//!   144 characters, not counting URLs
//! - Large multi-file changes must have a body
//! - "Apply suggestion to" commits require squash merging
//! - Squash-merged pull requests need a conventional title (warning)
//! - More than 10 commits suggests a rebase (warning)
//!
//! ## Example
//!
//! ```rust
//! use pr_commit_lint::{run_lint, Commit, Config, DiffStats, PullRequest};
//!
//! let config = Config::default();
//! let pr = PullRequest { title: "feat: parser".to_string(), squash: true };
//! let commits = vec![Commit::new("abc123", "feat(parser): add support for x", DiffStats::default())];
//!
//! let outcome = run_lint(&config, &commits, &pr);
//! assert!(outcome.success());
//! ```

#![doc(html_root_url = "https://docs.rs/pr-commit-lint/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod checks;
pub mod cli;
pub mod config;
pub mod core;

// Re-export main types for convenience
pub use checks::Rule;
pub use config::Config;
pub use core::commit::{Commit, DiffStats, LintInput, PullRequest};
pub use core::error::{Error, Result};
pub use core::linter::{run_lint, CommitLinter, LintOutcome, LintResult};
pub use core::report::{Diagnostic, OutputFormat, Report, Severity};
pub use core::subject::SemanticMatch;
