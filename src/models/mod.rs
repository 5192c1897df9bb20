//! Data models for design token documents
//!
//! - [`TokenType`]: the closed set of recognized `$type` values
//! - [`TokenValue`]: the normalized value shape for each type
//! - [`Group`] / [`Token`]: the token tree and the flat token records

mod token;
mod value;

pub use token::*;
pub use value::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized token `$type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Dimension,
    Duration,
    #[serde(alias = "fontFamily")]
    Font,
    FontWeight,
    Number,
    CubicBezier,
    Link,
    StrokeStyle,
    Border,
    Shadow,
    Gradient,
    Transition,
    Typography,
}

impl TokenType {
    /// Every recognized type, in declaration order.
    pub const ALL: [TokenType; 14] = [
        TokenType::Color,
        TokenType::Dimension,
        TokenType::Duration,
        TokenType::Font,
        TokenType::FontWeight,
        TokenType::Number,
        TokenType::CubicBezier,
        TokenType::Link,
        TokenType::StrokeStyle,
        TokenType::Border,
        TokenType::Shadow,
        TokenType::Gradient,
        TokenType::Transition,
        TokenType::Typography,
    ];

    /// Parse a `$type` string. `fontFamily` is accepted as a spelling of `font`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "color" => Some(TokenType::Color),
            "dimension" => Some(TokenType::Dimension),
            "duration" => Some(TokenType::Duration),
            "font" | "fontFamily" => Some(TokenType::Font),
            "fontWeight" => Some(TokenType::FontWeight),
            "number" => Some(TokenType::Number),
            "cubicBezier" => Some(TokenType::CubicBezier),
            "link" => Some(TokenType::Link),
            "strokeStyle" => Some(TokenType::StrokeStyle),
            "border" => Some(TokenType::Border),
            "shadow" => Some(TokenType::Shadow),
            "gradient" => Some(TokenType::Gradient),
            "transition" => Some(TokenType::Transition),
            "typography" => Some(TokenType::Typography),
            _ => None,
        }
    }

    /// The canonical `$type` spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::Duration => "duration",
            TokenType::Font => "font",
            TokenType::FontWeight => "fontWeight",
            TokenType::Number => "number",
            TokenType::CubicBezier => "cubicBezier",
            TokenType::Link => "link",
            TokenType::StrokeStyle => "strokeStyle",
            TokenType::Border => "border",
            TokenType::Shadow => "shadow",
            TokenType::Gradient => "gradient",
            TokenType::Transition => "transition",
            TokenType::Typography => "typography",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
