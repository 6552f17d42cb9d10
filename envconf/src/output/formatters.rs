//! Output formatter implementations.

use serde_json::Value;

use crate::config::Mapping;
use crate::{Error, Result};

use super::{OutputFormatter, ShellType};

/// Validates that a string is a valid environment variable name.
///
/// Valid names must:
/// - Start with a letter or underscore
/// - Contain only letters, digits, and underscores
fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Converts a key path to an environment variable name.
///
/// - Joins segments with underscores
/// - Converts to uppercase
/// - Replaces hyphens, dots and spaces with underscores
/// - Validates the result
fn key_path_to_env_var(prefix: Option<&str>, segments: &[&str]) -> Result<String> {
    let joined = prefix
        .into_iter()
        .chain(segments.iter().copied())
        .collect::<Vec<_>>()
        .join("_");
    let var_name = joined.to_uppercase().replace(['-', '.', ' '], "_");

    if !is_valid_env_var_name(&var_name) {
        return Err(Error::Validation {
            field: "environment_variable".to_string(),
            message: format!(
                "invalid environment variable name '{var_name}': must contain only alphanumeric characters and underscores, and start with a letter or underscore"
            ),
        });
    }

    Ok(var_name)
}

/// Render a leaf as the text stored in a variable.
fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// Flatten a mapping into `(VARIABLE, value)` pairs, sorted by variable.
///
/// Nested mappings contribute one variable per leaf; sequences are rendered
/// as compact JSON.
///
/// # Errors
///
/// Returns an error if a key path does not form a valid variable name, or if
/// two key paths normalize to the same variable (`db_host` and `db.host`).
pub fn flatten(config: &Mapping, prefix: Option<&str>) -> Result<Vec<(String, String)>> {
    fn walk<'a>(
        map: &'a Mapping,
        path: &mut Vec<&'a str>,
        prefix: Option<&str>,
        out: &mut Vec<(String, String, String)>,
    ) -> Result<()> {
        for (key, value) in map {
            path.push(key);
            match value {
                Value::Object(nested) => walk(nested, path, prefix, out)?,
                leaf => out.push((
                    key_path_to_env_var(prefix, path)?,
                    leaf_to_string(leaf),
                    path.join("."),
                )),
            }
            path.pop();
        }
        Ok(())
    }

    let mut vars = Vec::new();
    walk(config, &mut Vec::new(), prefix, &mut vars)?;
    vars.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(pair) = vars.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(Error::Validation {
            field: "environment_variable".to_string(),
            message: format!(
                "key paths '{}' and '{}' both map to environment variable '{}'",
                pair[0].2, pair[1].2, pair[0].0
            ),
        });
    }

    Ok(vars.into_iter().map(|(var, value, _)| (var, value)).collect())
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, config: &Mapping) -> Result<String> {
        serde_json::to_string_pretty(config).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, config: &Mapping) -> Result<String> {
        let yaml = serde_yaml::to_string(config).map_err(|e| Error::Validation {
            field: "yaml_output".to_string(),
            message: format!("failed to serialize to YAML: {e}"),
        })?;
        Ok(yaml.trim_end().to_string())
    }
}

/// Formatter for dotenv (.env file) format.
pub struct DotenvFormatter {
    prefix: Option<String>,
}

impl DotenvFormatter {
    /// Create a new dotenv formatter.
    ///
    /// `prefix` is prepended (with an underscore) to every variable name.
    #[must_use]
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }
}

impl OutputFormatter for DotenvFormatter {
    fn format(&self, config: &Mapping) -> Result<String> {
        let lines: Vec<String> = flatten(config, self.prefix.as_deref())?
            .into_iter()
            .map(|(var, value)| format!("{var}={}", dotenv_quote(&value)))
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Quote a dotenv value so loaders read it back literally.
///
/// Values with `$` or backticks are single-quoted to keep loaders from
/// expanding them. When that is impossible the value is double-quoted with
/// `$` and backticks escaped.
fn dotenv_quote(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\' | '$' | '`'));
    if !needs_quotes {
        return value.to_string();
    }

    let expands = value.contains(['$', '`']);
    if expands && !value.contains(['\'', '\n']) {
        return format!("'{value}'");
    }

    let escaped = value
        .replace('\\', r"\\")
        .replace('"', "\\\"")
        .replace('$', r"\$")
        .replace('`', r"\`")
        .replace('\n', r"\n");
    format!("\"{escaped}\"")
}

/// Formatter for shell-specific export statements.
pub struct ExportFormatter {
    shell: ShellType,
    prefix: Option<String>,
}

impl ExportFormatter {
    /// Create a new export formatter.
    #[must_use]
    pub fn new(shell: ShellType, prefix: Option<String>) -> Self {
        Self { shell, prefix }
    }
}

impl OutputFormatter for ExportFormatter {
    fn format(&self, config: &Mapping) -> Result<String> {
        let exports: Vec<String> = flatten(config, self.prefix.as_deref())?
            .into_iter()
            .map(|(var, value)| self.shell.format_export(&var, &value))
            .collect();
        Ok(exports.join("\n"))
    }
}
