//! Library exports for envconf-cli.
//!
//! Exposes the CLI structure so tests and tooling can inspect the
//! command tree without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
