//! Output formatting for resolved configuration.
//!
//! This module renders a configuration mapping as JSON, YAML, a dotenv file,
//! or shell-specific export statements.

mod formatters;
mod shell;

use crate::config::Mapping;
use crate::Result;

pub use formatters::{flatten, DotenvFormatter, ExportFormatter, JsonFormatter, YamlFormatter};
pub use shell::ShellType;

/// Trait for formatting a configuration mapping into different output formats.
pub trait OutputFormatter {
    /// Format the given configuration into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatting fails (e.g., invalid environment variable names).
    fn format(&self, config: &Mapping) -> Result<String>;
}

/// Available output formats for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML document.
    Yaml,
    /// Dotenv (.env file) format.
    Dotenv,
    /// Shell-specific export statements.
    Export(ShellType),
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// `prefix` only applies to the flattened formats (dotenv and export).
    #[must_use]
    pub fn create_formatter(&self, prefix: Option<String>) -> Box<dyn OutputFormatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
            Self::Dotenv => Box::new(DotenvFormatter::new(prefix)),
            Self::Export(shell) => Box::new(ExportFormatter::new(*shell, prefix)),
        }
    }
}
