//! Normalized token value shapes
//!
//! Each `$type` has exactly one canonical in-memory shape, regardless of the
//! shorthand used in the source document.

use super::TokenType;
use serde::Serialize;
use std::collections::BTreeMap;

/// A normalized token value, one variant per [`TokenType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Lowercase `#rrggbb` or `#rrggbbaa`
    Color(String),
    /// CSS length, e.g. `16px`, `1.5rem`, `0`
    Dimension(String),
    /// CSS time, e.g. `150ms`
    Duration(String),
    /// Ordered font family names, unquoted
    Font(Vec<String>),
    /// Numeric weight 1-1000
    FontWeight(u16),
    Number(f64),
    /// `[x1, y1, x2, y2]`
    CubicBezier([f64; 4]),
    /// Path or URL of an asset
    Link(String),
    StrokeStyle(StrokeStyle),
    Border(Border),
    /// Shadow layers, painted first to last
    Shadow(Vec<ShadowLayer>),
    Gradient(Vec<GradientStop>),
    Transition(Transition),
    /// Kebab-case property name to value, sorted by name
    Typography(BTreeMap<String, TypographyProperty>),
}

impl TokenValue {
    /// The token type this value shape belongs to.
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenValue::Color(_) => TokenType::Color,
            TokenValue::Dimension(_) => TokenType::Dimension,
            TokenValue::Duration(_) => TokenType::Duration,
            TokenValue::Font(_) => TokenType::Font,
            TokenValue::FontWeight(_) => TokenType::FontWeight,
            TokenValue::Number(_) => TokenType::Number,
            TokenValue::CubicBezier(_) => TokenType::CubicBezier,
            TokenValue::Link(_) => TokenType::Link,
            TokenValue::StrokeStyle(_) => TokenType::StrokeStyle,
            TokenValue::Border(_) => TokenType::Border,
            TokenValue::Shadow(_) => TokenType::Shadow,
            TokenValue::Gradient(_) => TokenType::Gradient,
            TokenValue::Transition(_) => TokenType::Transition,
            TokenValue::Typography(_) => TokenType::Typography,
        }
    }
}

/// A stroke style keyword or a custom dash pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StrokeStyle {
    Keyword(String),
    #[serde(rename_all = "camelCase")]
    Dashed { dash_array: Vec<String>, line_cap: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Border {
    pub color: String,
    pub width: String,
    pub style: StrokeStyle,
}

/// One layer of a (possibly multi-layer) shadow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowLayer {
    pub offset_x: String,
    pub offset_y: String,
    pub blur: String,
    pub spread: String,
    pub color: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub inset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: String,
    /// Position along the gradient line, in [0, 1]
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub duration: String,
    pub delay: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_function: Option<[f64; 4]>,
}

/// A single typography property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypographyProperty {
    Number(f64),
    Text(String),
    /// Font family list
    List(Vec<String>),
}
