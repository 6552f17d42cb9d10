//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `show`: Resolve the configuration and print it
//! - `get`: Print a single value by dotted key path
//! - `keys`: List top-level keys
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod get;
pub mod keys;
pub mod show;

pub use completions::CompletionsCommand;
pub use get::GetCommand;
pub use keys::KeysCommand;
pub use show::ShowCommand;
