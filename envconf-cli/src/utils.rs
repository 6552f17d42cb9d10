//! Utility functions for CLI operations.
//!
//! This module provides helpers shared by the commands: global options,
//! configuration resolution, and parsing of `--extend` arguments.

use crate::error::CliError;
use envconf::{Config, ConfigBuilder, Source};
use serde_json::Value;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Configuration directory override.
    pub dir: Option<PathBuf>,

    /// Selected environment override.
    pub env: Option<String>,

    /// Default environment override.
    pub default_env: Option<String>,
}

/// Resolve the configuration selected by the global options.
///
/// Options that clap already filled from `ENVCONF_*` variables take
/// precedence; anything still unset falls back inside the library.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref dir) = global.dir {
        builder = builder.with_dir(dir);
    }
    if let Some(ref name) = global.default_env {
        builder = builder.with_default_env(name);
    }
    if let Some(ref name) = global.env {
        builder = builder.with_env(name);
    }

    let config = builder.build()?;
    log::debug!(
        "resolved {} top-level keys for environment {}",
        config.len(),
        config.environments().env()
    );
    Ok(config)
}

/// Parse an `--extend` argument into a source.
///
/// Arguments starting with `{` are inline JSON objects; anything else is a
/// module path or configuration directory.
pub fn parse_source(arg: &str) -> Result<Source, CliError> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed).map_err(|e| {
            CliError::InvalidArguments(format!("invalid inline JSON in --extend: {e}"))
        })?;
        return Source::try_from(value).map_err(CliError::from);
    }

    if arg.is_empty() {
        return Err(CliError::InvalidArguments(
            "--extend requires a path or an inline JSON object".to_string(),
        ));
    }

    Ok(Source::path(arg))
}
