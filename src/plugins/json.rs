//! JSON output plugin.
//!
//! Writes the flat resolved token list. Each entry carries:
//! - `id`: dotted token path
//! - `$type`, `$value`: declared type and normalized default value
//! - `$description`: when present
//! - `$extensions.mode`: normalized mode values, in source order
//!
//! # Example Output
//!
//! ```json
//! [
//!   {
//!     "id": "color.bg",
//!     "$type": "color",
//!     "$value": "#ffffff",
//!     "$extensions": { "mode": { "dark": "#000000" } }
//!   }
//! ]
//! ```

use crate::models::{Token, TokenType, TokenValue};
use crate::plugin::{BuildArtifact, BuildInput, Plugin, PluginFailure};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Options of the JSON plugin.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JsonOptions {
    /// Output file name, relative to the output directory
    pub filename: String,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self { filename: "tokens.json".to_string() }
    }
}

#[derive(Serialize)]
struct JsonToken<'a> {
    id: &'a str,
    #[serde(rename = "$type")]
    token_type: TokenType,
    #[serde(rename = "$value")]
    value: &'a TokenValue,
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "$extensions", skip_serializing_if = "Option::is_none")]
    extensions: Option<JsonExtensions<'a>>,
}

#[derive(Serialize)]
struct JsonExtensions<'a> {
    mode: &'a IndexMap<String, TokenValue>,
}

impl<'a> From<&'a Token> for JsonToken<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            id: &token.id,
            token_type: token.token_type,
            value: &token.value,
            description: token.description.as_deref(),
            extensions: (!token.modes.is_empty()).then_some(JsonExtensions { mode: &token.modes }),
        }
    }
}

/// JSON output plugin.
#[derive(Debug, Default)]
pub struct JsonPlugin {
    options: JsonOptions,
}

impl JsonPlugin {
    pub fn new(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Serialize tokens to a pretty JSON string.
    pub fn export_to_string(&self, tokens: &[Token]) -> Result<String, serde_json::Error> {
        let entries: Vec<JsonToken<'_>> = tokens.iter().map(JsonToken::from).collect();
        let mut json = serde_json::to_string_pretty(&entries)?;
        json.push('\n');
        Ok(json)
    }
}

impl Plugin for JsonPlugin {
    fn name(&self) -> &str {
        "json"
    }

    fn build(&self, input: &BuildInput<'_>) -> Result<Vec<BuildArtifact>, PluginFailure> {
        let json = self.export_to_string(input.tokens)?;
        Ok(vec![BuildArtifact::text(self.options.filename.clone(), json)])
    }
}
