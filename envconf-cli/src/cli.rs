//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, GetCommand, KeysCommand, ShowCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting layered, environment-specific configuration.
#[derive(Parser)]
#[command(name = "envconf")]
#[command(version, about = "Resolve layered, environment-specific configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Configuration directory (defaults to ./configs)
    #[arg(long, value_name = "PATH", global = true, env = "ENVCONF_CONFIG_DIR")]
    pub dir: Option<PathBuf>,

    /// Environment to overlay on top of the default one
    #[arg(long, value_name = "NAME", global = true, env = "ENVCONF_ENV")]
    pub env: Option<String>,

    /// Name of the default environment (defaults to "default")
    #[arg(long, value_name = "NAME", global = true, env = "ENVCONF_DEFAULT_ENV")]
    pub default_env: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve the configuration and print it
    Show(ShowCommand),

    /// Print a single value by dotted key path
    Get(GetCommand),

    /// List top-level keys
    Keys(KeysCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
