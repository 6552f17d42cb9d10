//! Configuration resolution for envconf.
//!
//! A configuration directory holds one module per environment. Resolution
//! loads the default environment's module, then deep-merges the selected
//! environment's module on top of it:
//!
//! ```text
//! configs/
//! ├── default.yaml          # applied first, optional
//! ├── production/
//! │   └── index.yaml        # a directory module
//! └── stress.json           # applied when ENVCONF_ENV=stress
//! ```
//!
//! The result is a [`Config`], which can be extended afterwards with more
//! mappings, module files, or whole configuration directories.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Sources passed to [`Config::extend`] (later calls win)
//! 2. The selected environment module
//! 3. The default environment module
//!
//! # Examples
//!
//! ```no_run
//! use envconf::config::ConfigBuilder;
//! use serde_json::json;
//!
//! let config = ConfigBuilder::new()
//!     .with_dir("configs")
//!     .with_env("production")
//!     .build()
//!     .unwrap();
//!
//! config.extend(["configs/plugins"]).unwrap();
//! assert_eq!(config.get("env"), Some(json!("production")));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod object;
pub mod probe;
pub mod resolver;
pub mod source;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// A configuration mapping: string keys to arbitrary JSON-shaped values.
pub type Mapping = serde_json::Map<String, serde_json::Value>;

// Re-export key types at module root
pub use builder::{load, ConfigBuilder, LoadOptions, DEFAULT_CONFIG_DIR};
pub use environment::{EnvironmentConfig, Environments, DEFAULT_ENV_NAME};
pub use loader::{FileLoader, LoadOutcome, ModuleLoader};
pub use merger::DeepMerger;
pub use object::{Config, RESERVED_KEY};
pub use probe::is_directory;
pub use resolver::{resolve, DirectoryResolver};
pub use source::Source;
