#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # envconf
//!
//! A library for resolving layered, environment-specific configuration.
//!
//! A configuration directory holds a module for the default environment and
//! one per deployment environment. Loading merges the selected environment on
//! top of the default one and returns a [`Config`] that can be extended later
//! with more mappings, files, or directories.
//!
//! ## Core Types
//!
//! - [`Config`]: The resolved, extensible configuration object
//! - [`ConfigBuilder`] and [`load`]: Entry points with process-level fallbacks
//! - [`config::ModuleLoader`]: Pluggable module loading
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use envconf::{load, LoadOptions};
//! use std::path::Path;
//!
//! let config = load(Some(Path::new("configs")), LoadOptions::default()).unwrap();
//! config.extend(["configs/local.yaml"]).unwrap();
//!
//! println!("{}", serde_json::to_string_pretty(&config).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod output;

// Re-export key types at crate root for convenience
pub use config::{load, Config, ConfigBuilder, LoadOptions, Source};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
