//! Error types for the envconf library.
//!
//! This module provides the error hierarchy for configuration resolution
//! and extension, using `thiserror` for ergonomic error handling.
//!
//! A missing source is deliberately absent from this enum: the module loader
//! reports it as [`LoadOutcome::NotFound`](crate::config::LoadOutcome), and
//! callers substitute an empty mapping. Everything that reaches the caller
//! as an [`Error`] is a real failure.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an envconf error.
///
/// # Examples
///
/// ```
/// use envconf::{Error, Result};
///
/// fn example_operation() -> Result<()> {
///     Err(Error::NoSource)
/// }
///
/// assert!(example_operation().is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the envconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration source exists but could not be read or parsed.
    #[error("failed to load {}: {reason}", path.display())]
    SourceLoad {
        /// The source that failed to load.
        path: PathBuf,
        /// The reason loading failed.
        reason: String,
    },

    /// A configuration source has an extension no loader understands.
    #[error("unsupported configuration format: {}", path.display())]
    UnsupportedFormat {
        /// The offending source.
        path: PathBuf,
    },

    /// A configuration source parsed, but its top-level value is not a mapping.
    #[error("configuration in {} is not a mapping", path.display())]
    NotAMapping {
        /// The offending source.
        path: PathBuf,
    },

    /// `extend` was called without any sources.
    #[error("object/path in extend was not specified")]
    NoSource,

    /// A config was asked to extend itself.
    #[error("cannot extend config with itself")]
    SelfExtend,

    /// An attempt was made to overwrite a reserved config property.
    #[error("`{key}` property cannot be redefined in config")]
    ProtectedProperty {
        /// The reserved key that was targeted.
        key: String,
    },

    /// An I/O error occurred outside of module loading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if the error came from loading a configuration source.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconf::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::NotAMapping { path: PathBuf::from("configs/default.yaml") };
    /// assert!(err.is_load_error());
    /// assert!(!Error::NoSource.is_load_error());
    /// ```
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::SourceLoad { .. } | Self::UnsupportedFormat { .. } | Self::NotAMapping { .. }
        )
    }

    /// Check if the error is a rejected write to a reserved property.
    #[must_use]
    pub fn is_protected_property(&self) -> bool {
        matches!(self, Self::ProtectedProperty { .. })
    }
}
