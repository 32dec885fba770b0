//! Error types for pr-commit-lint.
//!
//! Lint findings are not errors: they are reported through
//! [`Report`](crate::core::report::Report). This module covers the conditions
//! that stop the tool from producing a report at all.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pr-commit-lint.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Configuration file not found.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path where config was expected.
        path: PathBuf,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        /// Description of the parse error.
        message: String,
        /// Optional source error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    ConfigInvalid {
        /// Field name that is invalid.
        field: String,
        /// Description of why it's invalid.
        message: String,
    },

    // =========================================================================
    // Input errors
    // =========================================================================
    /// The commit/pull request document could not be decoded.
    #[error("Invalid lint input: {message}")]
    InputParse {
        /// Description of the decode error.
        message: String,
        /// Source error.
        #[source]
        source: serde_json::Error,
    },

    /// Neither an input document nor a revision range was given.
    #[error("No commits to lint: pass --input or --base")]
    NoInput,

    // =========================================================================
    // Git errors
    // =========================================================================
    /// Not in a Git repository.
    #[error("Not in a Git repository")]
    NotGitRepo,

    /// Git operation failed.
    #[error("Git operation failed: {operation} - {message}")]
    GitOperation {
        /// Name of the operation that failed.
        operation: String,
        /// Error message.
        message: String,
    },

    // =========================================================================
    // Hook errors
    // =========================================================================
    /// Hook already exists and wasn't created by us.
    #[error("Git hook already exists at {path}. Use --force to overwrite.")]
    HookExists {
        /// Path to existing hook.
        path: PathBuf,
    },

    // =========================================================================
    // I/O errors
    // =========================================================================
    /// File I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Description of what failed.
        message: String,
        /// Source error.
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Internal errors
    // =========================================================================
    /// Internal error (should never happen).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Creates a new configuration parse error with source.
    pub fn config_parse_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new invalid configuration error.
    pub fn config_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new input decode error.
    pub fn input(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InputParse {
            message: message.into(),
            source,
        }
    }

    /// Creates a new I/O error with context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates a new Git operation error.
    pub fn git(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GitOperation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns true if this is a user-correctable error.
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigInvalid { .. }
                | Self::InputParse { .. }
                | Self::NoInput
                | Self::NotGitRepo
                | Self::HookExists { .. }
        )
    }

    /// Returns an exit code appropriate for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => {
                78
            }, // EX_CONFIG
            Self::InputParse { .. } | Self::NotGitRepo | Self::GitOperation { .. } => 65, // EX_DATAERR
            Self::NoInput => 64, // EX_USAGE
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").expect_err("should fail")
    }

    #[test]
    fn test_display_config_not_found() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/my/pr-commit-lint.toml"),
        };
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /my/pr-commit-lint.toml"
        );
    }

    #[test]
    fn test_display_config_invalid() {
        let err = Error::config_invalid("rules.types", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: rules.types - must not be empty"
        );
    }

    #[test]
    fn test_display_input_parse() {
        let err = Error::input("read commits.json", json_error());
        assert_eq!(err.to_string(), "Invalid lint input: read commits.json");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_no_input() {
        assert_eq!(
            Error::NoInput.to_string(),
            "No commits to lint: pass --input or --base"
        );
    }

    #[test]
    fn test_display_git_operation() {
        let err = Error::git("rev-list", "bad revision");
        assert_eq!(
            err.to_string(),
            "Git operation failed: rev-list - bad revision"
        );
    }

    #[test]
    fn test_display_hook_exists() {
        let err = Error::HookExists {
            path: PathBuf::from(".git/hooks/commit-msg"),
        };
        assert_eq!(
            err.to_string(),
            "Git hook already exists at .git/hooks/commit-msg. Use --force to overwrite."
        );
    }

    fn toml_error() -> toml::de::Error {
        toml::from_str::<toml::Value>("invalid [[[toml").expect_err("should fail")
    }

    #[test]
    fn test_config_parse_with_source() {
        let err = Error::config_parse_with_source("bad toml", toml_error());
        assert!(matches!(&err, Error::ConfigParse { message, source }
            if message == "bad toml" && source.is_some()
        ));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::config_parse_with_source("x", toml_error()).exit_code(), 78);
        assert_eq!(Error::config_invalid("x", "y").exit_code(), 78);
        assert_eq!(Error::NotGitRepo.exit_code(), 65);
        assert_eq!(Error::git("op", "msg").exit_code(), 65);
        assert_eq!(Error::input("x", json_error()).exit_code(), 65);
        assert_eq!(Error::NoInput.exit_code(), 64);
        assert_eq!(
            Error::Internal {
                message: "x".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_is_user_error() {
        assert!(Error::NotGitRepo.is_user_error());
        assert!(Error::NoInput.is_user_error());
        assert!(Error::config_invalid("x", "y").is_user_error());
        assert!(!Error::config_parse_with_source("x", toml_error()).is_user_error());
        assert!(!Error::io("x", std::io::Error::other("y")).is_user_error());
    }
}
