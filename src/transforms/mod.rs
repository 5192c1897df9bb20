//! Value transforms for stylesheet output
//!
//! A transform turns one token value (default or a mode) into a literal of
//! the target syntax. Every token type has a default transformer; callers can
//! install an override that runs first.
//!
//! # Module Structure
//!
//! - [`emit`] - Statement tree and the SCSS / indented Sass emitter
//! - [`sass`] - Default per-type Sass transformers

pub mod emit;
pub mod sass;

pub use emit::{quote, Emitter, SassExpr, Statement, Syntax};
pub use sass::SassTransformer;

use crate::models::Token;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// User override for a token value.
///
/// Receives the token and the mode being emitted (`None` for the default
/// value). Returning `None` or an empty string falls through to the default
/// transformer.
pub type TransformFn = Arc<dyn Fn(&Token, Option<&str>) -> Option<String> + Send + Sync>;

/// Error raised by a default transformer.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("token '{id}': cannot embed {}: {source}", .path.display())]
    Embed {
        id: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Run the override for a token/mode pair, if there is one.
///
/// Returns `Some` only when the override produced a non-empty literal.
pub fn apply_override(
    custom: Option<&TransformFn>,
    token: &Token,
    mode: Option<&str>,
) -> Option<String> {
    custom.and_then(|f| f(token, mode)).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupMeta, TokenType, TokenValue};
    use indexmap::IndexMap;
    use serde_json::{Map, Value};

    fn token() -> Token {
        Token {
            id: "color.red".into(),
            name: "red".into(),
            token_type: TokenType::Color,
            description: None,
            value: TokenValue::Color("#ff0000".into()),
            modes: IndexMap::new(),
            extensions: Map::new(),
            group: Arc::new(GroupMeta::default()),
            original: Value::Null,
        }
    }

    #[test]
    fn test_no_override() {
        assert_eq!(apply_override(None, &token(), None), None);
    }

    #[test]
    fn test_override_empty_falls_through() {
        let empty: TransformFn = Arc::new(|_, _| Some(String::new()));
        let none: TransformFn = Arc::new(|_, _| None);
        assert_eq!(apply_override(Some(&empty), &token(), None), None);
        assert_eq!(apply_override(Some(&none), &token(), Some("dark")), None);
    }

    #[test]
    fn test_override_sees_mode() {
        let custom: TransformFn = Arc::new(|token, mode| match mode {
            Some(m) => Some(format!("{}-{}", token.name, m)),
            None => None,
        });
        assert_eq!(apply_override(Some(&custom), &token(), Some("dark")).as_deref(), Some("red-dark"));
        assert_eq!(apply_override(Some(&custom), &token(), None), None);
    }
}
