//! Configuration module discovery and loading.
//!
//! A "module" is whatever a path names once extensions and directory indexes
//! are taken into account: `configs/production` may be satisfied by
//! `configs/production.yaml`, `configs/production.json`, or
//! `configs/production/index.yaml`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::probe::is_directory;
use crate::config::Mapping;
use crate::error::{Error, Result};

/// Extensions tried, in order, when a module path has none.
pub const MODULE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// File stem looked up inside a directory module.
pub const INDEX_STEM: &str = "index";

/// Outcome of a successful load attempt.
///
/// A missing module is an expected outcome, not an error: resolution skips
/// it and `extend` substitutes an empty mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The module exists and parsed into a mapping.
    Found(Mapping),
    /// Nothing exists at the module path.
    NotFound,
}

impl LoadOutcome {
    /// Converts the outcome into a mapping, using an empty one for `NotFound`.
    #[must_use]
    pub fn into_mapping(self) -> Mapping {
        match self {
            Self::Found(mapping) => mapping,
            Self::NotFound => Mapping::new(),
        }
    }
}

/// Turns a module path into a mapping.
///
/// Implementations must report a missing module as
/// [`LoadOutcome::NotFound`] and reserve `Err` for modules that exist but
/// cannot be loaded.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleLoader {
    /// Load the module at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the module exists but cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<LoadOutcome>;
}

/// Loads YAML and JSON modules from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use envconf::config::{FileLoader, LoadOutcome, ModuleLoader};
/// use std::path::Path;
///
/// match FileLoader.load(Path::new("configs/production")).unwrap() {
///     LoadOutcome::Found(mapping) => println!("{} keys", mapping.len()),
///     LoadOutcome::NotFound => println!("no production overlay"),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl ModuleLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<LoadOutcome> {
        match Self::locate(path) {
            Some(file) => {
                log::trace!("loading module {}", file.display());
                Self::load_file(&file).map(LoadOutcome::Found)
            }
            None => Ok(LoadOutcome::NotFound),
        }
    }
}

impl FileLoader {
    /// Find the file a module path refers to.
    ///
    /// Lookup order:
    /// 1. `path` itself, if it is a regular file
    /// 2. `path.yaml`, `path.yml`, `path.json`
    /// 3. `path/index.yaml`, `path/index.yml`, `path/index.json` if `path` is a directory
    #[must_use]
    pub fn locate(path: &Path) -> Option<PathBuf> {
        if path.is_file() {
            return Some(path.to_path_buf());
        }

        if let Some(file) = MODULE_EXTENSIONS
            .iter()
            .map(|ext| append_extension(path, ext))
            .find(|candidate| candidate.is_file())
        {
            return Some(file);
        }

        if is_directory(path) {
            return MODULE_EXTENSIONS
                .iter()
                .map(|ext| path.join(format!("{INDEX_STEM}.{ext}")))
                .find(|candidate| candidate.is_file());
        }

        None
    }

    /// Read and parse a single configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its extension is not
    /// supported, it is not valid YAML/JSON, or its top level is not a mapping.
    pub fn load_file(path: &Path) -> Result<Mapping> {
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => {
                return Err(Error::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let contents = fs::read_to_string(path).map_err(|e| Error::SourceLoad {
            path: path.to_path_buf(),
            reason: format!("failed to read configuration file: {e}"),
        })?;

        if contents.trim().is_empty() {
            return Ok(Mapping::new());
        }

        let value: Value = match format {
            Format::Yaml => serde_yaml::from_str(&contents).map_err(|e| Error::SourceLoad {
                path: path.to_path_buf(),
                reason: format!("invalid YAML: {e}"),
            })?,
            Format::Json => serde_json::from_str(&contents).map_err(|e| Error::SourceLoad {
                path: path.to_path_buf(),
                reason: format!("invalid JSON: {e}"),
            })?,
        };

        match value {
            Value::Object(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(Error::NotAMapping {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

/// `configs/production` + `yaml` -> `configs/production.yaml`, keeping any dots
/// already in the file name.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
