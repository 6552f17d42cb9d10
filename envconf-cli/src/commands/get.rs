//! Get command implementation.
//!
//! Prints a single value from the resolved configuration. Strings print
//! raw so the output can be used directly in scripts.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::{Args, ValueEnum};
use serde_json::Value;

/// Print a single value by dotted key path.
#[derive(Args)]
pub struct GetCommand {
    /// Dotted key path, e.g. `db.replicas.0.host`
    #[arg(value_name = "KEY.PATH")]
    pub key: String,

    /// Output format for non-string values
    #[arg(long, value_enum, default_value = "json", ignore_case = true)]
    pub format: ValueFormat,
}

/// Output format for the get command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ValueFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.key.is_empty() {
            return Err(CliError::InvalidArguments(
                "key path must not be empty".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let value = config
            .lookup(&self.key)
            .ok_or_else(|| CliError::KeyNotFound(self.key.clone()))?;

        println!("{}", render(&value, self.format)?);
        Ok(())
    }
}

fn render(value: &Value, format: ValueFormat) -> Result<String, CliError> {
    match (value, format) {
        (Value::String(s), _) => Ok(s.clone()),
        (_, ValueFormat::Json) => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::InvalidArguments(format!("cannot render value: {e}"))),
        (_, ValueFormat::Yaml) => serde_yaml::to_string(value)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| CliError::InvalidArguments(format!("cannot render value: {e}"))),
    }
}
