//! Entry point: assemble directory, environments and loader, then resolve.

use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::environment::{non_empty, EnvironmentConfig, Environments};
use crate::config::loader::{FileLoader, ModuleLoader};
use crate::config::object::Config;
use crate::config::resolver::DirectoryResolver;
use crate::config::source::Source;
use crate::error::Result;

/// Directory used when neither an explicit directory nor `ENVCONF_CONFIG_DIR` is set.
pub const DEFAULT_CONFIG_DIR: &str = "configs";

/// Environment names for [`load`]. Unset or empty fields fall back to the
/// process environment, then to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Default environment name (`ENVCONF_DEFAULT_ENV`, then `"default"`).
    pub default_env: Option<String>,
    /// Selected environment name (`ENVCONF_ENV`, then the default environment).
    pub env: Option<String>,
}

/// Builder for resolving a [`Config`].
///
/// # Precedence
///
/// For each setting, highest first:
///
/// 1. Values given to the builder
/// 2. ENVCONF_* environment variables (unless [`skip_env`](Self::skip_env))
/// 3. Built-in defaults: `./configs`, `"default"`, and the default environment
///
/// # Examples
///
/// ```no_run
/// use envconf::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_dir("configs")
///     .with_env("production")
///     .extend_with("configs/local.yaml")
///     .build()
///     .unwrap();
///
/// println!("{}", serde_json::to_string_pretty(&config).unwrap());
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    dir: Option<PathBuf>,
    default_env: Option<String>,
    env: Option<String>,
    loader: Option<Rc<dyn ModuleLoader>>,
    skip_env: bool,
    extensions: Vec<Source>,
}

impl ConfigBuilder {
    /// Create a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve this directory instead of `ENVCONF_CONFIG_DIR` or `./configs`.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set the default environment name.
    #[must_use]
    pub fn with_default_env(mut self, name: impl Into<String>) -> Self {
        self.default_env = Some(name.into());
        self
    }

    /// Set the selected environment name.
    #[must_use]
    pub fn with_env(mut self, name: impl Into<String>) -> Self {
        self.env = Some(name.into());
        self
    }

    /// Apply both names from `options`, leaving unset ones untouched.
    #[must_use]
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        if let Some(default_env) = options.default_env {
            self.default_env = Some(default_env);
        }
        if let Some(env) = options.env {
            self.env = Some(env);
        }
        self
    }

    /// Use a custom module loader for resolution and later `extend` calls.
    #[must_use]
    pub fn with_loader(mut self, loader: Rc<dyn ModuleLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Ignore ENVCONF_* environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Queue a source to extend the config with right after resolution.
    ///
    /// Path sources are classified as file or directory here, when the
    /// source is converted, not later in [`build`](Self::build). A directory
    /// created after this call is still treated as a module path.
    #[must_use]
    pub fn extend_with(mut self, source: impl Into<Source>) -> Self {
        self.extensions.push(source.into());
        self
    }

    /// Resolve the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment module or queued source fails to
    /// load, if any of them defines the reserved `extend` key, or if the
    /// current directory cannot be determined when falling back to
    /// `./configs`.
    pub fn build(self) -> Result<Config> {
        let process = if self.skip_env {
            EnvironmentConfig::default()
        } else {
            EnvironmentConfig::from_process()
        };

        let dir = match self.dir.or(process.config_dir) {
            Some(dir) => dir,
            None => env::current_dir()?.join(DEFAULT_CONFIG_DIR),
        };
        let environments = Environments::new(
            non_empty(self.default_env).or(process.default_env),
            non_empty(self.env).or(process.env),
        );
        let loader = self.loader.unwrap_or_else(|| Rc::new(FileLoader));

        log::debug!(
            "resolving {} with environments {} -> {}",
            dir.display(),
            environments.default_env(),
            environments.env()
        );
        let config = DirectoryResolver::new(environments, loader).resolve(&dir)?;

        if !self.extensions.is_empty() {
            config.extend(self.extensions)?;
        }

        Ok(config)
    }
}

/// Resolve a configuration directory with process-level fallbacks.
///
/// `dir` falls back to `ENVCONF_CONFIG_DIR`, then `./configs`. Environment
/// names fall back as described on [`LoadOptions`].
///
/// # Errors
///
/// Returns an error if an environment module exists but fails to load.
///
/// # Examples
///
/// ```no_run
/// use envconf::{load, LoadOptions};
/// use std::path::Path;
///
/// let config = load(
///     Some(Path::new("configs")),
///     LoadOptions { env: Some("production".into()), ..Default::default() },
/// )
/// .unwrap();
/// assert_eq!(config.environments().env(), "production");
/// ```
pub fn load(dir: Option<&Path>, options: LoadOptions) -> Result<Config> {
    let mut builder = ConfigBuilder::new().with_options(options);
    if let Some(dir) = dir {
        builder = builder.with_dir(dir);
    }
    builder.build()
}
