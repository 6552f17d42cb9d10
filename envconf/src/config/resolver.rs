//! Directory resolution: default environment first, selected environment on top.

use std::path::Path;
use std::rc::Rc;

use crate::config::environment::Environments;
use crate::config::loader::{FileLoader, LoadOutcome, ModuleLoader};
use crate::config::merger::DeepMerger;
use crate::config::object::{check_reserved, Config};
use crate::config::Mapping;
use crate::error::Result;

/// Resolves a configuration directory into a [`Config`].
///
/// For each of the default and selected environment names, the module
/// `directory/<name>` is loaded and deep-merged into the result. A missing
/// module is skipped for either slot; any other load failure is returned.
///
/// # Examples
///
/// ```no_run
/// use envconf::config::{DirectoryResolver, Environments};
/// use std::path::Path;
///
/// let envs = Environments::new(None, Some("production".to_string()));
/// let config = DirectoryResolver::with_file_loader(envs)
///     .resolve(Path::new("configs"))
///     .unwrap();
/// println!("{:?}", config.get("env"));
/// ```
pub struct DirectoryResolver {
    environments: Environments,
    loader: Rc<dyn ModuleLoader>,
}

impl DirectoryResolver {
    /// Create a resolver using the given loader.
    #[must_use]
    pub fn new(environments: Environments, loader: Rc<dyn ModuleLoader>) -> Self {
        Self {
            environments,
            loader,
        }
    }

    /// Create a resolver that reads YAML/JSON files from disk.
    #[must_use]
    pub fn with_file_loader(environments: Environments) -> Self {
        Self::new(environments, Rc::new(FileLoader))
    }

    /// Resolve `directory` into a fresh config.
    ///
    /// The returned config remembers this resolver's environments and loader
    /// and uses them for later `extend` calls.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment module exists but fails to load, or
    /// if it defines the reserved `extend` key.
    pub fn resolve(&self, directory: &Path) -> Result<Config> {
        let data = self.resolve_mapping(directory)?;
        Ok(Config::from_parts(
            data,
            self.environments.clone(),
            Rc::clone(&self.loader),
        ))
    }

    /// Resolve `directory` into a bare mapping.
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryResolver::resolve`].
    pub fn resolve_mapping(&self, directory: &Path) -> Result<Mapping> {
        let mut data = Mapping::new();

        for name in self.environments.names() {
            let module = directory.join(name);
            match self.loader.load(&module)? {
                LoadOutcome::Found(mapping) => {
                    check_reserved(&mapping)?;
                    log::debug!(
                        "merging {name} environment from {} ({} keys)",
                        module.display(),
                        mapping.len()
                    );
                    DeepMerger::merge_into(&mut data, &mapping);
                }
                LoadOutcome::NotFound => {
                    log::debug!("no {name} environment in {}", directory.display());
                }
            }
        }

        Ok(data)
    }
}

/// Resolve `directory` from disk with the given environment names.
///
/// `default_env` falls back to `"default"` and `env` falls back to
/// `default_env`; empty names count as unset.
///
/// # Errors
///
/// Returns an error if an environment module exists but fails to load.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// let config = envconf::config::resolve(Path::new("configs"), None, Some("stress")).unwrap();
/// assert_eq!(config.environments().env(), "stress");
/// ```
pub fn resolve(directory: &Path, default_env: Option<&str>, env: Option<&str>) -> Result<Config> {
    let environments = Environments::new(default_env.map(str::to_owned), env.map(str::to_owned));
    DirectoryResolver::with_file_loader(environments).resolve(directory)
}
