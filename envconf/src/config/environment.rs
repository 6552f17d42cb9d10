//! Environment names and process-level defaults.
//!
//! This module defines the default/selected environment pair that drives
//! resolution, and reads the ENVCONF_* variables that supply defaults for it.

use std::env;
use std::path::PathBuf;

/// Variable naming the configuration directory.
pub const CONFIG_DIR_VAR: &str = "ENVCONF_CONFIG_DIR";

/// Variable naming the default environment.
pub const DEFAULT_ENV_VAR: &str = "ENVCONF_DEFAULT_ENV";

/// Variable naming the selected environment.
pub const ENV_VAR: &str = "ENVCONF_ENV";

/// Default environment name used when nothing else is configured.
pub const DEFAULT_ENV_NAME: &str = "default";

/// The pair of environments applied during resolution.
///
/// The default environment is applied first, the selected environment on
/// top of it. Both are fixed once a config is created and are reused for
/// every directory the config is later extended with.
///
/// # Examples
///
/// ```
/// use envconf::config::Environments;
///
/// let envs = Environments::new(None, Some("production".to_string()));
/// assert_eq!(envs.default_env(), "default");
/// assert_eq!(envs.env(), "production");
///
/// // The selected environment falls back to the default one.
/// let envs = Environments::new(Some("base".to_string()), None);
/// assert_eq!(envs.env(), "base");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environments {
    default_env: String,
    env: String,
}

impl Environments {
    /// Build the environment pair, applying fallbacks.
    ///
    /// Empty names count as unset.
    #[must_use]
    pub fn new(default_env: Option<String>, env: Option<String>) -> Self {
        let default_env = non_empty(default_env).unwrap_or_else(|| DEFAULT_ENV_NAME.to_string());
        let env = non_empty(env).unwrap_or_else(|| default_env.clone());
        Self { default_env, env }
    }

    /// The fallback environment, applied first.
    #[must_use]
    pub fn default_env(&self) -> &str {
        &self.default_env
    }

    /// The selected environment, applied second.
    #[must_use]
    pub fn env(&self) -> &str {
        &self.env
    }

    /// Names in application order. Both slots are always present, even when equal.
    #[must_use]
    pub fn names(&self) -> [&str; 2] {
        [self.default_env.as_str(), self.env.as_str()]
    }

    /// Whether the selected environment is the default one.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.default_env == self.env
    }
}

impl Default for Environments {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Process-level defaults read from ENVCONF_* variables.
///
/// # Examples
///
/// ```no_run
/// use envconf::config::EnvironmentConfig;
///
/// let process = EnvironmentConfig::from_process();
/// if let Some(dir) = process.config_dir {
///     println!("configs live in {}", dir.display());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Value of `ENVCONF_CONFIG_DIR`.
    pub config_dir: Option<PathBuf>,
    /// Value of `ENVCONF_DEFAULT_ENV`.
    pub default_env: Option<String>,
    /// Value of `ENVCONF_ENV`.
    pub env: Option<String>,
}

impl EnvironmentConfig {
    /// Read the ENVCONF_* variables. Unset, empty, and non-UTF-8 values are ignored.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            config_dir: read_var(CONFIG_DIR_VAR).map(PathBuf::from),
            default_env: read_var(DEFAULT_ENV_VAR),
            env: read_var(ENV_VAR),
        }
    }
}

fn read_var(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

/// Treat empty strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
