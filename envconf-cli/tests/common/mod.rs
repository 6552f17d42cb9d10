//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary configuration directory
//! - Command builder helpers with a clean process environment
//! - Fixture writers for environment modules

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Process variables the binary reads; cleared for every test command.
const ENVCONF_VARS: [&str; 4] = [
    "ENVCONF_CONFIG_DIR",
    "ENVCONF_DEFAULT_ENV",
    "ENVCONF_ENV",
    "ENVCONF_LOG_MODE",
];

/// Test environment with an isolated configuration directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the configuration directory (`<temp>/configs`)
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an empty `configs/` directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("configs");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Create a test environment with the usual default/production/stress layout.
    pub fn with_standard_configs() -> Self {
        let env = Self::new();
        env.write_config(
            "default/index.yaml",
            "env: default\ndefaultValue: true\ndeep:\n  deep:\n    deep: [default]\n    bar: foo\n",
        );
        env.write_config("production.yaml", "env: production\n");
        env.write_config(
            "stress.json",
            r#"{"env": "stress", "deep": {"deep": {"deep": ["stress"], "foo": "bar"}}}"#,
        );
        env
    }

    /// Get a bare command builder with the `ENVCONF_*` variables cleared.
    ///
    /// The working directory is the temp directory, so the built-in
    /// `./configs` fallback points at this environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("envconf").expect("Failed to find envconf binary");
        for var in ENVCONF_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with `--dir` pointing at the config directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--dir").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the config directory, creating parents.
    pub fn write_config(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.config_dir.join(relative);
        write_file(&path, contents);
        path
    }

    /// Write a file relative to the temp directory, creating parents.
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        write_file(&path, contents);
        path
    }

    /// Run `envconf show` with extra arguments and return stdout.
    pub fn show(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("show")
            .args(args)
            .output()
            .expect("Failed to run show command");

        assert!(
            output.status.success(),
            "Show failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Run `envconf show --format json` and parse the result.
    pub fn show_json(&self, args: &[&str]) -> serde_json::Value {
        let mut all = vec!["--format", "json"];
        all.extend_from_slice(args);
        serde_json::from_str(&self.show(&all)).expect("show output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, contents).expect("Failed to write test file");
}
