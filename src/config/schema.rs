//! Configuration schema types for `tokenweave.toml`
//!
//! Defines the structure and validation rules for project configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One entry of the ordered plugin list.
///
/// `name` selects the plugin; every other key is passed to it as options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    /// Registered plugin name (e.g. "sass", "json")
    pub name: String,
    /// Plugin-specific options
    #[serde(flatten)]
    pub options: toml::Table,
}

impl PluginSpec {
    /// Create a spec with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), options: toml::Table::new() }
    }

    /// Add an option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Complete tokenweave.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenweaveConfig {
    /// Token source files or glob patterns, merged in order
    #[serde(default = "default_tokens")]
    pub tokens: Vec<String>,
    /// Directory build artifacts are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Plugins, run in this order
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
}

fn default_tokens() -> Vec<String> {
    vec!["tokens.json".to_string()]
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("tokens")
}

impl Default for TokenweaveConfig {
    fn default() -> Self {
        Self { tokens: default_tokens(), out_dir: default_out_dir(), plugins: Vec::new() }
    }
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "plugins[1].name")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tokenweave.toml: '{}' {}", self.field, self.message)
    }
}

impl TokenweaveConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.tokens.is_empty() {
            errors.push(ConfigValidationError {
                field: "tokens".to_string(),
                message: "must list at least one token file".to_string(),
            });
        }
        for (i, pattern) in self.tokens.iter().enumerate() {
            if pattern.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("tokens[{}]", i),
                    message: "must be a non-empty path".to_string(),
                });
            }
        }

        if self.out_dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "out_dir".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        for (i, plugin) in self.plugins.iter().enumerate() {
            if plugin.name.is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("plugins[{}].name", i),
                    message: "must be a non-empty string".to_string(),
                });
            } else if !crate::plugins::BUILTIN_PLUGINS.contains(&plugin.name.as_str()) {
                errors.push(ConfigValidationError {
                    field: format!("plugins[{}].name", i),
                    message: format!(
                        "unknown plugin '{}' (expected one of: {})",
                        plugin.name,
                        crate::plugins::BUILTIN_PLUGINS.join(", ")
                    ),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parse() {
        let config: TokenweaveConfig = toml::from_str("").unwrap();
        assert_eq!(config.tokens, vec!["tokens.json"]);
        assert_eq!(config.out_dir, PathBuf::from("tokens"));
        assert!(config.plugins.is_empty());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
tokens = ["tokens/base.json", "tokens/themes/*.json"]
out_dir = "dist/tokens"

[[plugins]]
name = "sass"
filename = "variables"
indented_syntax = true

[[plugins]]
name = "json"
"#;
        let config: TokenweaveConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.tokens.len(), 2);
        assert_eq!(config.out_dir, PathBuf::from("dist/tokens"));
        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins[0].name, "sass");
        assert_eq!(config.plugins[0].options.get("filename").and_then(|v| v.as_str()), Some("variables"));
        assert_eq!(config.plugins[0].options.get("indented_syntax").and_then(|v| v.as_bool()), Some(true));
        assert!(config.plugins[1].options.is_empty());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validation_collects_every_error() {
        let config = TokenweaveConfig {
            tokens: vec![" ".to_string()],
            out_dir: PathBuf::new(),
            plugins: vec![PluginSpec::new(""), PluginSpec::new("less")],
        };
        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["tokens[0]", "out_dir", "plugins[0].name", "plugins[1].name"]);
        assert!(errors[3].to_string().contains("unknown plugin 'less'"));
    }

    #[test]
    fn test_plugin_spec_builder() {
        let spec = PluginSpec::new("sass").with_option("filename", "theme");
        assert_eq!(spec.options.get("filename"), Some(&toml::Value::String("theme".into())));
    }
}
