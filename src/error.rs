//! Error types for rbdiag operations.
//!
//! This module defines [`RbdiagError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fact probes never return `RbdiagError`; they degrade to placeholders
//! - Use `RbdiagError` for config, wrapper, and CLI plumbing failures
//! - Use `anyhow::Error` (via `RbdiagError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rbdiag operations.
#[derive(Debug, Error)]
pub enum RbdiagError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The gem wrapper was asked to run a command it does not know.
    #[error("{name} is not a valid gem command!")]
    UnknownGemCommand { name: String },

    /// The gem wrapper was given an empty command line.
    #[error("No gem command given")]
    EmptyGemCommand,

    /// Shell command failed while running.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A program could not be started at all.
    #[error("Failed to start {command}: {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    /// The Ruby interpreter could not be run or produced unreadable output.
    #[error("Ruby runtime unavailable ({ruby}): {message}")]
    RuntimeUnavailable { ruby: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rbdiag operations.
pub type Result<T> = std::result::Result<T, RbdiagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = RbdiagError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = RbdiagError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unknown_gem_command_matches_console_wording() {
        let err = RbdiagError::UnknownGemCommand {
            name: "instal".into(),
        };
        assert_eq!(err.to_string(), "instal is not a valid gem command!");
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = RbdiagError::CommandFailed {
            command: "gem list".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("gem list"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn runtime_unavailable_names_interpreter() {
        let err = RbdiagError::RuntimeUnavailable {
            ruby: "/opt/ruby/bin/ruby".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/opt/ruby/bin/ruby"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RbdiagError = io_err.into();
        assert!(matches!(err, RbdiagError::Io(_)));
    }

    #[test]
    fn anyhow_errors_are_transparent() {
        let err: RbdiagError = anyhow::anyhow!("Malformed PEM in /etc/ssl/cert.pem").into();
        assert_eq!(err.to_string(), "Malformed PEM in /etc/ssl/cert.pem");
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RbdiagError::EmptyGemCommand)
        }
        assert!(returns_error().is_err());
    }
}
