//! Error types for token resolution
//!
//! Every resolution-stage error is fatal to the build: a single bad token can
//! be referenced by many others through aliases, so a partially resolved graph
//! is never handed to plugins.

use crate::models::TokenType;
use thiserror::Error;

/// Failure while parsing, resolving, normalizing or flattening tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// Malformed node, untyped token or unrecognized `$type`
    #[error("schema error at '{path}': {message}")]
    Schema { path: String, message: String },

    /// A value does not match the shape required by its declared type
    #[error("token '{id}' ({token_type}): invalid {field}: {message}")]
    Type { id: String, token_type: TokenType, field: String, message: String },

    /// An alias points at a token that does not exist
    #[error("token '{from}' references unknown token '{missing}'")]
    UnknownToken { from: String, missing: String },

    /// A chain of aliases loops back on itself
    #[error("circular alias: {}", .cycle.join(" -> "))]
    CircularReference { cycle: Vec<String> },

    /// Two tokens flattened to the same id
    #[error("duplicate token id '{id}'")]
    DuplicateToken { id: String },
}

impl ResolveError {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::Schema { path: path.into(), message: message.into() }
    }

    pub(crate) fn type_error(
        id: &str,
        token_type: TokenType,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ResolveError::Type {
            id: id.to_string(),
            token_type,
            field: field.into(),
            message: message.into(),
        }
    }

    /// The token id (or tree path) this error is about.
    pub fn token_id(&self) -> &str {
        match self {
            ResolveError::Schema { path, .. } => path,
            ResolveError::Type { id, .. } => id,
            ResolveError::UnknownToken { from, .. } => from,
            ResolveError::CircularReference { cycle } => {
                cycle.first().map(|s| s.as_str()).unwrap_or("")
            }
            ResolveError::DuplicateToken { id } => id,
        }
    }
}
