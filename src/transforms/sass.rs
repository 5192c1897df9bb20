//! Default Sass transformers, one per token type

use super::emit::{quote, SassExpr};
use super::{apply_override, TransformError, TransformFn};
use crate::models::{
    Border, GradientStop, ShadowLayer, StrokeStyle, Token, TokenValue, Transition,
    TypographyProperty,
};
use crate::normalize::format_number;
use base64::Engine;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Generic font families, emitted unquoted.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
];

/// Formats normalized token values as Sass literals.
#[derive(Clone, Default)]
pub struct SassTransformer {
    /// Base directory for embedding `link` tokens; `None` keeps paths as strings
    embed_root: Option<PathBuf>,
    custom: Option<TransformFn>,
}

impl std::fmt::Debug for SassTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SassTransformer")
            .field("embed_root", &self.embed_root)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl SassTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline local `link` files as data URIs, resolving paths against `root`.
    pub fn with_embed_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.embed_root = Some(root.into());
        self
    }

    /// Install an override that runs before the default transformer.
    pub fn with_override(mut self, custom: Option<TransformFn>) -> Self {
        self.custom = custom;
        self
    }

    /// Transform one token/mode pair: the override, then the default.
    pub fn transform(&self, token: &Token, mode: Option<&str>) -> Result<SassExpr, TransformError> {
        if let Some(literal) = apply_override(self.custom.as_ref(), token, mode) {
            return Ok(SassExpr::Literal(literal));
        }
        self.default_value(token, token.value_for_mode(mode))
    }

    /// Default transformer for a value of `token`'s type.
    pub fn default_value(&self, token: &Token, value: &TokenValue) -> Result<SassExpr, TransformError> {
        let literal = match value {
            TokenValue::Color(s) | TokenValue::Dimension(s) | TokenValue::Duration(s) => s.clone(),
            TokenValue::Font(families) => font_list(families),
            TokenValue::FontWeight(w) => w.to_string(),
            TokenValue::Number(n) => format_number(*n),
            TokenValue::CubicBezier(points) => cubic_bezier(points),
            TokenValue::Link(path) => self.link(token, path)?,
            TokenValue::StrokeStyle(style) => return Ok(stroke_style(style)),
            TokenValue::Border(border) => border_literal(border),
            TokenValue::Shadow(layers) => {
                parenthesized(layers.iter().map(shadow_layer).collect())
            }
            TokenValue::Gradient(stops) => parenthesized(stops.iter().map(gradient_stop).collect()),
            TokenValue::Transition(transition) => transition_literal(transition),
            TokenValue::Typography(properties) => return Ok(typography_map(properties)),
        };
        Ok(SassExpr::Literal(literal))
    }

    fn link(&self, token: &Token, path: &str) -> Result<String, TransformError> {
        let root = match &self.embed_root {
            Some(root) if !is_remote(path) => root,
            _ => return Ok(quote(path)),
        };

        let full = root.join(path);
        let bytes = std::fs::read(&full).map_err(|source| TransformError::Embed {
            id: token.id.clone(),
            path: full.clone(),
            source,
        })?;
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(format!("url(\"data:{};base64,{}\")", mime_type(&full), data))
    }
}

/// Property map for a typography value, keys in sorted order.
pub fn typography_map(properties: &BTreeMap<String, TypographyProperty>) -> SassExpr {
    SassExpr::Map(
        properties
            .iter()
            .map(|(name, value)| {
                let literal = match value {
                    TypographyProperty::Number(n) => format_number(*n),
                    TypographyProperty::Text(s) => s.clone(),
                    TypographyProperty::List(families) => font_list(families),
                };
                (name.clone(), SassExpr::Literal(literal))
            })
            .collect(),
    )
}

fn is_remote(path: &str) -> bool {
    path.contains("://") || path.starts_with("data:")
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("css") => "text/css",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Wrap a comma list in parentheses when it has more than one item.
fn parenthesized(items: Vec<String>) -> String {
    match items.len() {
        0 => "()".to_string(),
        1 => items.into_iter().next().unwrap_or_default(),
        _ => format!("({})", items.join(", ")),
    }
}

fn font_list(families: &[String]) -> String {
    parenthesized(
        families
            .iter()
            .map(|f| if GENERIC_FAMILIES.contains(&f.as_str()) { f.clone() } else { quote(f) })
            .collect(),
    )
}

fn cubic_bezier(points: &[f64; 4]) -> String {
    let args: Vec<String> = points.iter().map(|p| format_number(*p)).collect();
    format!("cubic-bezier({})", args.join(", "))
}

fn stroke_style(style: &StrokeStyle) -> SassExpr {
    match style {
        StrokeStyle::Keyword(k) => SassExpr::Literal(k.clone()),
        StrokeStyle::Dashed { dash_array, line_cap } => SassExpr::Map(vec![
            ("dash-array".into(), SassExpr::Literal(parenthesized(dash_array.clone()))),
            ("line-cap".into(), SassExpr::Literal(line_cap.clone())),
        ]),
    }
}

fn border_literal(border: &Border) -> String {
    let style = match &border.style {
        StrokeStyle::Keyword(k) => k.as_str(),
        StrokeStyle::Dashed { .. } => "dashed",
    };
    format!("{} {} {}", border.width, style, border.color)
}

fn shadow_layer(layer: &ShadowLayer) -> String {
    let parts = [
        layer.offset_x.as_str(),
        layer.offset_y.as_str(),
        layer.blur.as_str(),
        layer.spread.as_str(),
        layer.color.as_str(),
    ];
    if layer.inset {
        format!("inset {}", parts.join(" "))
    } else {
        parts.join(" ")
    }
}

/// Stop positions are fractions; percentages keep six decimal places.
fn gradient_stop(stop: &GradientStop) -> String {
    let percent = (stop.position * 100.0 * 1e6).round() / 1e6;
    format!("{} {}%", stop.color, format_number(percent))
}

fn transition_literal(transition: &Transition) -> String {
    match &transition.timing_function {
        Some(points) => {
            format!("{} {} {}", transition.duration, cubic_bezier(points), transition.delay)
        }
        None => format!("{} {}", transition.duration, transition.delay),
    }
}
