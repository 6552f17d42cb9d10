//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use envconf::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Requested key is absent from the resolved configuration - exit code 1.
    KeyNotFound(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Requested key not found
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::KeyNotFound(_) => 1,
            CliError::InvalidArguments(_) => 4,
            CliError::Library(LibError::Validation { .. }) => 4,
            CliError::Io(_) => 5,
            CliError::Library(LibError::Io(_)) => 5,
            CliError::Library(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::KeyNotFound(key) => write!(f, "Key not found: {key}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::KeyNotFound("db.host".into()).exit_code(), 1);
        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);
        assert_eq!(
            CliError::Io(std::io::Error::other("disk")).exit_code(),
            5
        );
        assert_eq!(CliError::from(LibError::SelfExtend).exit_code(), 7);
        assert_eq!(
            CliError::from(LibError::SourceLoad {
                path: PathBuf::from("configs/production.yaml"),
                reason: "bad indent".into(),
            })
            .exit_code(),
            7
        );
        assert_eq!(
            CliError::from(LibError::Validation {
                field: "shell".into(),
                message: "unknown".into(),
            })
            .exit_code(),
            4
        );
    }

    #[test]
    fn test_display_wraps_library_message() {
        let err = CliError::from(LibError::ProtectedProperty {
            key: "extend".into(),
        });
        assert_eq!(
            err.to_string(),
            "`extend` property cannot be redefined in config"
        );
    }
}
