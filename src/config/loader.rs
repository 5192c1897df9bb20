//! Configuration loading and discovery for `tokenweave.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::TokenweaveConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "tokenweave.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse tokenweave.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
    /// Malformed glob in the token list
    #[error("Invalid token pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    /// A glob in the token list matched nothing
    #[error("Token pattern '{0}' matched no files")]
    NoMatches(String),
    /// No plugin is registered under this name
    #[error("Unknown plugin '{0}'")]
    UnknownPlugin(String),
    /// A plugin rejected its options
    #[error("Invalid options for plugin '{plugin}': {message}")]
    PluginOptions { plugin: String, message: String },
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out_dir: Option<PathBuf>,
    /// Replace the token source list
    pub tokens: Option<Vec<String>>,
}

/// Find tokenweave.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find tokenweave.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a tokenweave.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("design-system/tokenweave.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<TokenweaveConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<TokenweaveConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TokenweaveConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no tokenweave.toml is found: `tokens.json` in,
/// `tokens/` out, and the sass plugin with default options.
pub fn default_config() -> TokenweaveConfig {
    TokenweaveConfig {
        plugins: vec![super::PluginSpec::new("sass")],
        ..TokenweaveConfig::default()
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut TokenweaveConfig, overrides: &CliOverrides) {
    if let Some(ref out_dir) = overrides.out_dir {
        config.out_dir = out_dir.clone();
    }

    if let Some(ref tokens) = overrides.tokens {
        config.tokens = tokens.clone();
    }
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
