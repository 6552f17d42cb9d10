//! Shell detection and export formatting.

use std::env;

use crate::{Error, Result};

/// Supported shell types for export formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    /// Bourne Again Shell (bash).
    Bash,
    /// Z Shell (zsh).
    Zsh,
    /// Friendly Interactive Shell (fish).
    Fish,
    /// `PowerShell`.
    PowerShell,
}

impl ShellType {
    /// Detect the current shell from environment variables.
    ///
    /// Detection precedence:
    /// 1. `ZSH_VERSION` - indicates zsh
    /// 2. `FISH_VERSION` - indicates fish
    /// 3. `PSModulePath` - indicates `PowerShell`
    /// 4. `SHELL` environment variable (path like `/bin/bash`)
    /// 5. Default to bash if unable to determine
    #[must_use]
    pub fn detect() -> Self {
        if env::var("ZSH_VERSION").is_ok() {
            return Self::Zsh;
        }
        if env::var("FISH_VERSION").is_ok() {
            return Self::Fish;
        }
        if env::var("PSModulePath").is_ok() {
            return Self::PowerShell;
        }

        match env::var("SHELL") {
            Ok(path) if path.contains("zsh") => Self::Zsh,
            Ok(path) if path.contains("fish") => Self::Fish,
            Ok(path) if path.contains("pwsh") || path.contains("powershell") => Self::PowerShell,
            _ => Self::Bash,
        }
    }

    /// Parse a shell type from a string.
    ///
    /// Accepts "bash", "sh", "zsh", "fish", "powershell", "pwsh", "ps"
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the shell name is not recognized.
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" | "ps" => Ok(Self::PowerShell),
            _ => Err(Error::Validation {
                field: "shell".to_string(),
                message: format!(
                    "unknown shell type '{s}': supported shells are bash, zsh, fish, powershell"
                ),
            }),
        }
    }

    /// Format an export statement for this shell type, quoting `value` as needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconf::output::ShellType;
    ///
    /// assert_eq!(ShellType::Bash.format_export("PORT", "5000"), "export PORT=5000");
    /// assert_eq!(ShellType::Bash.format_export("NAME", "it's"), "export NAME='it'\\''s'");
    /// assert_eq!(ShellType::Fish.format_export("PORT", "5000"), "set -x PORT 5000");
    /// assert_eq!(ShellType::PowerShell.format_export("PORT", "5000"), "$env:PORT=\"5000\"");
    /// ```
    #[must_use]
    pub fn format_export(&self, var: &str, value: &str) -> String {
        match self {
            Self::Bash | Self::Zsh => format!("export {var}={}", posix_quote(value)),
            Self::Fish => format!("set -x {var} {}", fish_quote(value)),
            Self::PowerShell => format!("$env:{var}=\"{}\"", powershell_escape(value)),
        }
    }
}

fn is_bare_word(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | ',' | '@' | '+'))
}

fn posix_quote(value: &str) -> String {
    if is_bare_word(value) {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

fn fish_quote(value: &str) -> String {
    if is_bare_word(value) {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'"))
    }
}

fn powershell_escape(value: &str) -> String {
    value
        .replace('`', "``")
        .replace('"', "`\"")
        .replace('$', "`$")
}
