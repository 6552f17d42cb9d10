//! Sources accepted by [`Config::extend`](crate::config::Config::extend).

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::object::Config;
use crate::config::probe::is_directory;
use crate::config::Mapping;
use crate::error::{Error, Result};

/// Something a config can be extended with.
///
/// Paths are classified once, when the source is built: [`Source::path`]
/// probes the filesystem and picks [`Source::Directory`] or
/// [`Source::File`]. The `From` conversions for paths and strings go through
/// it.
///
/// # Examples
///
/// ```
/// use envconf::config::{Mapping, Source};
///
/// let inline = Source::from(Mapping::new());
/// assert!(matches!(inline, Source::Inline(_)));
///
/// let missing = Source::path("/no/such/file.yaml");
/// assert!(matches!(missing, Source::File(_)));
/// ```
#[derive(Debug, Clone)]
pub enum Source {
    /// A module path, loaded through the config's module loader.
    /// A missing module contributes nothing.
    File(PathBuf),
    /// A configuration directory, resolved with the config's environments.
    Directory(PathBuf),
    /// An in-memory mapping.
    Inline(Mapping),
    /// The data of another config.
    Config(Config),
}

impl Source {
    /// Classify a filesystem path as a directory or file source.
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if is_directory(&path) {
            Self::Directory(path)
        } else {
            Self::File(path)
        }
    }
}

impl From<Mapping> for Source {
    fn from(mapping: Mapping) -> Self {
        Self::Inline(mapping)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

impl From<Config> for Source {
    fn from(config: Config) -> Self {
        Self::Config(config)
    }
}

impl From<&Config> for Source {
    fn from(config: &Config) -> Self {
        Self::Config(config.clone())
    }
}

impl TryFrom<Value> for Source {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(mapping) => Ok(Self::Inline(mapping)),
            other => Err(Error::Validation {
                field: "source".to_string(),
                message: format!("inline source must be a mapping, got {other}"),
            }),
        }
    }
}
