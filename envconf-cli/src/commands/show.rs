//! Show command implementation.
//!
//! This module implements the `show` command, which resolves the
//! configuration, applies any `--extend` sources, and prints the result.

use crate::error::CliError;
use crate::utils::{load_configuration, parse_source, GlobalOptions};
use clap::{Args, ValueEnum};
use envconf::output::{OutputFormat, ShellType};

/// Resolve the configuration and print it.
#[derive(Args)]
pub struct ShowCommand {
    /// Extra source to merge on top (path, directory, or inline JSON object)
    #[arg(long = "extend", value_name = "SOURCE")]
    pub extend: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json", ignore_case = true)]
    pub format: ShowFormat,

    /// Shell for export format (auto-detected if not specified)
    #[arg(long, value_name = "SHELL")]
    pub shell: Option<String>,

    /// Prefix for variable names in dotenv and export formats
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

/// Output format for the show command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ShowFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
    /// Dotenv lines (KEY=value)
    Dotenv,
    /// Shell export statements
    Export,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Validate arguments before touching the filesystem
        if self.shell.is_some() && self.format != ShowFormat::Export {
            return Err(CliError::InvalidArguments(
                "--shell is only valid with --format export".to_string(),
            ));
        }
        let format = self.output_format()?;
        let sources = self
            .extend
            .iter()
            .map(|arg| parse_source(arg))
            .collect::<Result<Vec<_>, _>>()?;

        // 2. Resolve the configuration
        let config = load_configuration(global)?;

        // 3. Apply extensions in order
        if !sources.is_empty() {
            config.extend(sources)?;
        }

        // 4. Format and print
        let formatter = format.create_formatter(self.prefix);
        let output = formatter.format(&config.to_mapping())?;
        if !output.is_empty() {
            println!("{output}");
        }

        Ok(())
    }

    fn output_format(&self) -> Result<OutputFormat, CliError> {
        Ok(match self.format {
            ShowFormat::Json => OutputFormat::Json,
            ShowFormat::Yaml => OutputFormat::Yaml,
            ShowFormat::Dotenv => OutputFormat::Dotenv,
            ShowFormat::Export => {
                let shell = match self.shell.as_deref() {
                    Some(name) => ShellType::from_string(name)?,
                    None => ShellType::detect(),
                };
                OutputFormat::Export(shell)
            }
        })
    }
}
