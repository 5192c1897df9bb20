//! Per-type value normalization
//!
//! Converts each resolved token's raw `$value` (and every mode override) into
//! the one canonical [`TokenValue`] shape for its type, whichever shorthand the
//! source used: a single shadow object and a one-element array of shadows
//! normalize identically, a bare font name and a one-element font list
//! normalize identically, and so on.
//!
//! Normalization runs after alias resolution; a value still holding an alias
//! string is rejected like any other malformed value.

mod composite;
mod scalar;

pub use composite::kebab_case;

use crate::error::ResolveError;
use crate::models::{Group, Node, Token, TokenType, TokenValue};
use serde_json::Value;

/// Location of a value inside a token, used to build [`ResolveError::Type`].
#[derive(Debug, Clone)]
pub(crate) struct Field<'a> {
    id: &'a str,
    token_type: TokenType,
    path: String,
}

impl<'a> Field<'a> {
    fn root(id: &'a str, token_type: TokenType, mode: Option<&str>) -> Self {
        let path = match mode {
            Some(m) => format!("$extensions.mode.{}", m),
            None => "$value".to_string(),
        };
        Field { id, token_type, path }
    }

    fn key(&self, name: &str) -> Field<'a> {
        Field { id: self.id, token_type: self.token_type, path: format!("{}.{}", self.path, name) }
    }

    fn index(&self, i: usize) -> Field<'a> {
        Field { id: self.id, token_type: self.token_type, path: format!("{}[{}]", self.path, i) }
    }

    fn error(&self, message: impl Into<String>) -> ResolveError {
        ResolveError::type_error(self.id, self.token_type, &self.path, message)
    }

    fn as_str<'v>(&self, value: &'v Value) -> Result<&'v str, ResolveError> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Ok(s.trim()),
            Value::String(_) => Err(self.error("expected a non-empty string")),
            other => Err(self.error(format!("expected a string, found {}", describe(other)))),
        }
    }

    fn as_number(&self, value: &Value) -> Result<f64, ResolveError> {
        value
            .as_f64()
            .ok_or_else(|| self.error(format!("expected a number, found {}", describe(value))))
    }
}

/// Short JSON kind name for error messages.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalize one raw value of the given type.
///
/// `mode` is only used to label errors.
///
/// # Errors
///
/// Returns [`ResolveError::Type`] naming the token id, the declared type and
/// the offending field when the value does not fit the type's shape.
pub fn normalize_value(
    id: &str,
    token_type: TokenType,
    mode: Option<&str>,
    value: &Value,
) -> Result<TokenValue, ResolveError> {
    let field = Field::root(id, token_type, mode);
    match token_type {
        TokenType::Color => scalar::color(&field, value).map(TokenValue::Color),
        TokenType::Dimension => scalar::dimension(&field, value).map(TokenValue::Dimension),
        TokenType::Duration => scalar::duration(&field, value).map(TokenValue::Duration),
        TokenType::Font => scalar::font(&field, value).map(TokenValue::Font),
        TokenType::FontWeight => scalar::font_weight(&field, value).map(TokenValue::FontWeight),
        TokenType::Number => field.as_number(value).map(TokenValue::Number),
        TokenType::CubicBezier => scalar::cubic_bezier(&field, value).map(TokenValue::CubicBezier),
        TokenType::Link => field.as_str(value).map(|s| TokenValue::Link(s.to_string())),
        TokenType::StrokeStyle => scalar::stroke_style(&field, value).map(TokenValue::StrokeStyle),
        TokenType::Border => composite::border(&field, value).map(TokenValue::Border),
        TokenType::Shadow => composite::shadow(&field, value).map(TokenValue::Shadow),
        TokenType::Gradient => composite::gradient(&field, value).map(TokenValue::Gradient),
        TokenType::Transition => composite::transition(&field, value).map(TokenValue::Transition),
        TokenType::Typography => composite::typography(&field, value).map(TokenValue::Typography),
    }
}

/// Normalize a resolved token's default value and every mode override.
pub fn normalize_token(token: Token<Value>) -> Result<Token<TokenValue>, ResolveError> {
    let id = token.id.clone();
    let token_type = token.token_type;
    token.map_values(|mode, value| normalize_value(&id, token_type, mode, &value))
}

/// Normalize every token in a resolved tree, keeping its shape and order.
pub fn normalize_tree(group: Group<Value>) -> Result<Group<TokenValue>, ResolveError> {
    let mut children = Vec::with_capacity(group.children.len());
    for child in group.children {
        children.push(match child {
            Node::Group(g) => Node::Group(normalize_tree(g)?),
            Node::Token(t) => Node::Token(normalize_token(t)?),
        });
    }
    Ok(Group { name: group.name, meta: group.meta, children })
}

/// Format a number the way it reads in source: integers without a fraction.
///
/// ```
/// use tokenweave::normalize::format_number;
///
/// assert_eq!(format_number(16.0), "16");
/// assert_eq!(format_number(1.5), "1.5");
/// assert_eq!(format_number(-0.25), "-0.25");
/// ```
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
