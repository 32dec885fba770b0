//! Core functionality for pr-commit-lint.
//!
//! This module contains the main components:
//! - [`commit`]: Commit and pull request records
//! - [`subject`]: Conventional-commit subject parsing
//! - [`linter`]: The rule engine
//! - [`report`]: Diagnostics and output formats
//! - [`error`]: Error types and result handling
//! - [`git`]: Git repository operations

pub mod commit;
pub mod error;
pub mod git;
pub mod linter;
pub mod report;
pub mod subject;
