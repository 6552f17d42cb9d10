//! The extensible configuration object.
//!
//! A [`Config`] is a handle to a mapping of configuration data plus the
//! environments and module loader it was resolved with. `extend` is a method
//! on the handle, never an entry in the data, so it cannot be enumerated,
//! serialized, or overwritten. Writes that target the reserved key are
//! rejected with [`Error::ProtectedProperty`].
//!
//! Cloning a `Config` produces another handle to the same object: `extend`
//! on either handle is visible through both. This shared, in-place mutation
//! is the contract of `extend`, which merges into its receiver and returns
//! it. The handle is single-threaded (`!Send`).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::config::environment::Environments;
use crate::config::loader::{FileLoader, ModuleLoader};
use crate::config::merger::DeepMerger;
use crate::config::resolver::DirectoryResolver;
use crate::config::source::Source;
use crate::config::Mapping;
use crate::error::{Error, Result};

/// Name of the bound operation that no data key may shadow.
pub const RESERVED_KEY: &str = "extend";

/// Reject a mapping that would write the reserved key at the top level.
///
/// # Errors
///
/// Returns [`Error::ProtectedProperty`] if `mapping` contains [`RESERVED_KEY`].
pub fn check_reserved(mapping: &Mapping) -> Result<()> {
    if mapping.contains_key(RESERVED_KEY) {
        return Err(Error::ProtectedProperty {
            key: RESERVED_KEY.to_string(),
        });
    }
    Ok(())
}

/// A resolved configuration that can be extended after loading.
///
/// # Examples
///
/// ```
/// use envconf::config::{Config, Source};
/// use serde_json::json;
///
/// let config = Config::default();
/// let same = config
///     .extend([Source::try_from(json!({"db": {"host": "localhost"}})).unwrap()])
///     .unwrap()
///     .extend([Source::try_from(json!({"db": {"port": 5432}})).unwrap()])
///     .unwrap();
///
/// assert!(same.ptr_eq(&config));
/// assert_eq!(config.lookup("db.port"), Some(json!(5432)));
/// assert_eq!(config.keys(), vec!["db".to_string()]);
/// ```
#[derive(Clone)]
pub struct Config {
    data: Rc<RefCell<Mapping>>,
    environments: Environments,
    loader: Rc<dyn ModuleLoader>,
}

impl Config {
    /// Create an empty config that extends with the given environments and loader.
    #[must_use]
    pub fn new(environments: Environments, loader: Rc<dyn ModuleLoader>) -> Self {
        Self::from_parts(Mapping::new(), environments, loader)
    }

    /// Wrap already-resolved data. The caller guarantees the reserved key is absent.
    pub(crate) fn from_parts(
        data: Mapping,
        environments: Environments,
        loader: Rc<dyn ModuleLoader>,
    ) -> Self {
        debug_assert!(!data.contains_key(RESERVED_KEY));
        Self {
            data: Rc::new(RefCell::new(data)),
            environments,
            loader,
        }
    }

    /// Deep-merge one or more sources into this config, in order.
    ///
    /// Paths naming a directory are resolved with this config's environments;
    /// other paths are loaded as modules, and a missing module contributes
    /// nothing. Returns `self` so calls can be chained.
    ///
    /// Sources are checked for self-reference before anything is merged, so a
    /// call that includes this config as a source changes nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::NoSource`] if `sources` is empty
    /// - [`Error::SelfExtend`] if any source is this config
    /// - [`Error::ProtectedProperty`] if a source defines the reserved key;
    ///   that source is not merged
    /// - any load error from a file or directory source
    ///
    /// Sources earlier in the call than a failing one stay merged.
    pub fn extend<I>(&self, sources: I) -> Result<&Self>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        let sources: Vec<Source> = sources.into_iter().map(Into::into).collect();
        if sources.is_empty() {
            return Err(Error::NoSource);
        }
        if sources
            .iter()
            .any(|source| matches!(source, Source::Config(other) if other.ptr_eq(self)))
        {
            return Err(Error::SelfExtend);
        }

        for source in sources {
            let mapping = self.resolve_source(source)?;
            self.merge_mapping(&mapping)?;
        }

        Ok(self)
    }

    fn resolve_source(&self, source: Source) -> Result<Mapping> {
        match source {
            Source::Directory(dir) => {
                log::debug!("extending config with directory {}", dir.display());
                DirectoryResolver::new(self.environments.clone(), Rc::clone(&self.loader))
                    .resolve_mapping(&dir)
            }
            Source::File(path) => {
                log::debug!("extending config with module {}", path.display());
                Ok(self.loader.load(&path)?.into_mapping())
            }
            Source::Inline(mapping) => Ok(mapping),
            Source::Config(other) => Ok(other.to_mapping()),
        }
    }

    fn merge_mapping(&self, mapping: &Mapping) -> Result<()> {
        check_reserved(mapping)?;
        DeepMerger::merge_into(&mut self.data.borrow_mut(), mapping);
        Ok(())
    }

    /// Set a top-level value, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProtectedProperty`] if `key` is the reserved key.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        if key == RESERVED_KEY {
            return Err(Error::ProtectedProperty { key });
        }
        Ok(self.data.borrow_mut().insert(key, value))
    }

    /// Remove a top-level value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.data.borrow_mut().remove(key)
    }

    /// A copy of the top-level value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.borrow().get(key).cloned()
    }

    /// A copy of the value at a dotted path such as `db.replicas.0.host`.
    ///
    /// Numeric segments index into sequences.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let data = self.data.borrow();
        let mut segments = path.split('.');
        let mut current = data.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current.clone())
    }

    /// Whether a top-level data key exists. Always `false` for the reserved key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.borrow().contains_key(key)
    }

    /// Top-level data keys, sorted. Never includes the reserved key.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.data.borrow().keys().cloned().collect()
    }

    /// Number of top-level data keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the config holds no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    /// A copy of the data.
    #[must_use]
    pub fn to_mapping(&self) -> Mapping {
        self.data.borrow().clone()
    }

    /// A copy of the data as a JSON object value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_mapping())
    }

    /// The environments used when extending with directories.
    #[must_use]
    pub fn environments(&self) -> &Environments {
        &self.environments
    }

    /// Whether two handles refer to the same config.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Environments::default(), Rc::new(FileLoader))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data", &*self.data.borrow())
            .field("environments", &self.environments)
            .finish_non_exhaustive()
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data.borrow().serialize(serializer)
    }
}

impl PartialEq<Value> for Config {
    fn eq(&self, other: &Value) -> bool {
        match other {
            Value::Object(map) => *self.data.borrow() == *map,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{LoadOutcome, MockModuleLoader};
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn mapping(value: Value) -> Mapping {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn config_with(value: Value) -> Config {
        Config::from_parts(
            mapping(value),
            Environments::new(None, Some("production".into())),
            Rc::new(FileLoader),
        )
    }

    #[test]
    fn test_extend_returns_same_object() {
        let config = config_with(json!({"env": "production"}));
        let returned = config.extend([Mapping::new()]).unwrap();
        assert!(returned.ptr_eq(&config));
    }

    #[test]
    fn test_extend_from_mapping() {
        let config = config_with(json!({"env": "production", "deep": {"bar": "foo"}}));
        config
            .extend([mapping(json!({"included": "value", "deep": {"baz": 1}}))])
            .unwrap();

        assert_eq!(
            config,
            json!({"env": "production", "included": "value", "deep": {"bar": "foo", "baz": 1}})
        );
    }

    #[test]
    fn test_extend_accepts_many_sources_in_order() {
        let config = config_with(json!({"env": "production"}));
        config
            .extend([
                mapping(json!({"a": "1", "shared": "first"})),
                mapping(json!({"b": "2", "shared": "second"})),
            ])
            .unwrap();

        assert_eq!(
            config,
            json!({"env": "production", "a": "1", "b": "2", "shared": "second"})
        );
    }

    #[test]
    fn test_extend_without_sources_fails() {
        let config = config_with(json!({}));
        let err = config.extend(Vec::<Source>::new()).unwrap_err();
        assert!(matches!(err, Error::NoSource));
    }

    #[test]
    fn test_extend_with_itself_fails() {
        let config = config_with(json!({"env": "production"}));
        let err = config.extend([&config]).unwrap_err();
        assert!(matches!(err, Error::SelfExtend));
    }

    #[test]
    fn test_extend_with_clone_of_itself_fails() {
        let config = config_with(json!({}));
        let handle = config.clone();
        assert!(matches!(
            config.extend([handle]).unwrap_err(),
            Error::SelfExtend
        ));
    }

    #[test]
    fn test_self_extend_merges_nothing() {
        let config = config_with(json!({"env": "production"}));
        let err = config
            .extend([
                Source::from(mapping(json!({"before": true}))),
                Source::from(&config),
                Source::from(mapping(json!({"after": true}))),
            ])
            .unwrap_err();

        assert!(matches!(err, Error::SelfExtend));
        assert_eq!(config, json!({"env": "production"}));
    }

    #[test]
    fn test_extend_with_other_config() {
        let config = config_with(json!({"a": 1}));
        let other = config_with(json!({"b": 2}));

        config.extend([&other]).unwrap();
        assert_eq!(config, json!({"a": 1, "b": 2}));
        assert_eq!(other, json!({"b": 2}));
    }

    #[test]
    fn test_set_reserved_key_fails() {
        let config = config_with(json!({"env": "production"}));
        let err = config.set(RESERVED_KEY, json!("overwritten")).unwrap_err();

        assert!(err.is_protected_property());
        assert_eq!(config.keys(), vec!["env".to_string()]);
    }

    #[test]
    fn test_merge_reserved_key_fails_without_partial_merge() {
        let config = config_with(json!({"env": "production"}));
        let err = config
            .extend([mapping(json!({"extend": "x", "other": 1}))])
            .unwrap_err();

        assert!(err.is_protected_property());
        assert!(!config.contains_key("other"));
    }

    #[test]
    fn test_nested_reserved_name_is_plain_data() {
        let config = config_with(json!({}));
        config
            .extend([mapping(json!({"plugins": {"extend": true}}))])
            .unwrap();
        assert_eq!(config.lookup("plugins.extend"), Some(json!(true)));
    }

    #[test]
    fn test_reserved_key_never_serialized() {
        let config = config_with(json!({"env": "production"}));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, json!({"env": "production"}));
        assert!(!config.contains_key(RESERVED_KEY));
    }

    #[test]
    fn test_extend_from_missing_file_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_with(json!({"env": "production"}));
        config
            .extend([temp_dir.path().join("nothing-here").as_path()])
            .unwrap();
        assert_eq!(config, json!({"env": "production"}));
    }

    #[test]
    fn test_extend_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("justfile.yaml");
        fs::write(&file, "im: just a file\n").unwrap();

        let config = config_with(json!({"env": "production"}));
        config.extend([file]).unwrap();
        assert_eq!(config, json!({"env": "production", "im": "just a file"}));
    }

    #[test]
    fn test_extend_from_broken_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("broken.json");
        fs::write(&file, "{").unwrap();

        let config = config_with(json!({}));
        let err = config.extend([file]).unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn test_extend_from_directory_uses_captured_envs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("default.yaml"),
            "extendDefault: exDefault\nextendOverwrite: notOverwritten\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("production.yaml"),
            "extendOverwrite: overwritten\n",
        )
        .unwrap();

        let config = config_with(json!({"env": "production"}));
        let returned = config.extend([temp_dir.path()]).unwrap();

        assert!(returned.ptr_eq(&config));
        assert_eq!(
            config,
            json!({
                "env": "production",
                "extendDefault": "exDefault",
                "extendOverwrite": "overwritten"
            })
        );
    }

    #[test]
    fn test_extend_uses_configured_loader() {
        let mut loader = MockModuleLoader::new();
        loader
            .expect_load()
            .withf(|path| path == Path::new("virtual/module"))
            .times(1)
            .returning(|_| Ok(LoadOutcome::Found(mapping(json!({"from": "mock"})))));

        let config = Config::new(Environments::default(), Rc::new(loader));
        config
            .extend([Source::File("virtual/module".into())])
            .unwrap();
        assert_eq!(config.get("from"), Some(json!("mock")));
    }

    #[test]
    fn test_lookup_paths() {
        let config = config_with(json!({
            "db": {"replicas": [{"host": "a"}, {"host": "b"}]},
            "name": "svc"
        }));

        assert_eq!(config.lookup("db.replicas.1.host"), Some(json!("b")));
        assert_eq!(config.lookup("name"), Some(json!("svc")));
        assert_eq!(config.lookup("name.first"), None);
        assert_eq!(config.lookup("db.replicas.9"), None);
        assert_eq!(config.lookup("db.replicas.x"), None);
        assert_eq!(config.lookup("missing"), None);
    }

    #[test]
    fn test_clones_share_state() {
        let config = config_with(json!({}));
        let handle = config.clone();
        handle.set("shared", json!(true)).unwrap();

        assert!(config.ptr_eq(&handle));
        assert_eq!(config.get("shared"), Some(json!(true)));
        assert_eq!(config.remove("shared"), Some(json!(true)));
        assert!(handle.is_empty());
    }

    #[test]
    fn test_snapshot_and_len() {
        let config = config_with(json!({"a": 1, "b": 2}));
        assert_eq!(config.len(), 2);
        assert!(config.to_mapping().contains_key("a"));
    }

    #[test]
    fn test_extend_while_reading_snapshot() {
        let config = config_with(json!({"a": 1}));
        let handle = config.clone();

        let snapshot = handle.to_mapping();
        config
            .extend([mapping(json!({"b": snapshot["a"].clone()}))])
            .unwrap();
        handle.set("c", json!(3)).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(config, json!({"a": 1, "b": 1, "c": 3}));
    }
}
