//! Plugins shipped with tokenweave.
//!
//! # Supported Plugins
//!
//! - **sass**: Sass/SCSS maps plus a `token()` function and `typography` mixin
//! - **json**: the flat resolved token list as JSON
//!
//! # Example
//!
//! ```
//! use tokenweave::config::PluginSpec;
//! use tokenweave::plugins::from_spec;
//!
//! let plugin = from_spec(&PluginSpec::new("sass").with_option("filename", "theme")).unwrap();
//! assert_eq!(plugin.name(), "sass");
//! ```

pub mod json;
pub mod sass;

pub use json::{JsonOptions, JsonPlugin};
pub use sass::{SassOptions, SassPlugin};

use crate::config::{ConfigError, PluginSpec};
use crate::plugin::Plugin;
use serde::de::DeserializeOwned;

/// Names accepted in the `[[plugins]]` list.
pub const BUILTIN_PLUGINS: &[&str] = &["sass", "json"];

/// Instantiate a built-in plugin from its config entry.
pub fn from_spec(spec: &PluginSpec) -> Result<Box<dyn Plugin>, ConfigError> {
    match spec.name.as_str() {
        "sass" => Ok(Box::new(SassPlugin::new(parse_options(spec)?))),
        "json" => Ok(Box::new(JsonPlugin::new(parse_options(spec)?))),
        other => Err(ConfigError::UnknownPlugin(other.to_string())),
    }
}

/// Decode a plugin's option table.
fn parse_options<T: DeserializeOwned>(spec: &PluginSpec) -> Result<T, ConfigError> {
    toml::Value::Table(spec.options.clone()).try_into().map_err(|e: toml::de::Error| {
        ConfigError::PluginOptions { plugin: spec.name.clone(), message: e.message().to_string() }
    })
}
