//! Single-valued token types

use super::{describe, format_number, Field};
use crate::color::normalize_color;
use crate::error::ResolveError;
use crate::models::StrokeStyle;
use serde_json::Value;

const STROKE_KEYWORDS: [&str; 8] =
    ["solid", "dashed", "dotted", "double", "groove", "ridge", "outset", "inset"];

const LINE_CAPS: [&str; 3] = ["round", "butt", "square"];

pub(super) fn color(field: &Field<'_>, value: &Value) -> Result<String, ResolveError> {
    let s = field.as_str(value)?;
    normalize_color(s).map_err(|e| field.error(e.to_string()))
}

/// Strings pass through; bare numbers get `px` (except zero, which stays unitless).
pub(super) fn dimension(field: &Field<'_>, value: &Value) -> Result<String, ResolveError> {
    match value {
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or(0.0);
            if n == 0.0 {
                Ok("0".to_string())
            } else {
                Ok(format!("{}px", format_number(n)))
            }
        }
        _ => field.as_str(value).map(str::to_string),
    }
}

/// Strings pass through; bare numbers are milliseconds.
pub(super) fn duration(field: &Field<'_>, value: &Value) -> Result<String, ResolveError> {
    match value {
        Value::Number(n) => Ok(format!("{}ms", format_number(n.as_f64().unwrap_or(0.0)))),
        _ => field.as_str(value).map(str::to_string),
    }
}

pub(super) fn font(field: &Field<'_>, value: &Value) -> Result<Vec<String>, ResolveError> {
    match value {
        Value::Array(items) if items.is_empty() => Err(field.error("font list is empty")),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| field.index(i).as_str(item).map(str::to_string))
            .collect(),
        _ => field.as_str(value).map(|s| vec![s.to_string()]),
    }
}

pub(super) fn font_weight(field: &Field<'_>, value: &Value) -> Result<u16, ResolveError> {
    match value {
        Value::Number(n) => {
            let w = n.as_f64().unwrap_or(0.0);
            if w.fract() != 0.0 || !(1.0..=1000.0).contains(&w) {
                return Err(field.error(format!("font weight {} must be an integer 1-1000", w)));
            }
            Ok(w as u16)
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(w) = s.parse::<u16>() {
                return font_weight(field, &Value::from(w));
            }
            named_weight(s).ok_or_else(|| field.error(format!("unknown font weight '{}'", s)))
        }
        other => Err(field.error(format!("expected a number or weight name, found {}", describe(other)))),
    }
}

/// Numeric value of a named weight, ignoring case and separators.
pub(crate) fn named_weight(name: &str) -> Option<u16> {
    let key: String = name
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();
    match key.as_str() {
        "thin" | "hairline" => Some(100),
        "extralight" | "ultralight" => Some(200),
        "light" => Some(300),
        "normal" | "regular" | "book" => Some(400),
        "medium" => Some(500),
        "semibold" | "demibold" => Some(600),
        "bold" => Some(700),
        "extrabold" | "ultrabold" => Some(800),
        "black" | "heavy" => Some(900),
        _ => None,
    }
}

/// `[x1, y1, x2, y2]` with both x coordinates in [0, 1].
pub(super) fn cubic_bezier(field: &Field<'_>, value: &Value) -> Result<[f64; 4], ResolveError> {
    let items = value
        .as_array()
        .ok_or_else(|| field.error(format!("expected an array of 4 numbers, found {}", describe(value))))?;
    if items.len() != 4 {
        return Err(field.error(format!("expected 4 numbers, found {}", items.len())));
    }

    let mut points = [0.0; 4];
    for (i, item) in items.iter().enumerate() {
        let n = field.index(i).as_number(item)?;
        if (i == 0 || i == 2) && !(0.0..=1.0).contains(&n) {
            return Err(field.index(i).error(format!("x coordinate {} must be within [0, 1]", n)));
        }
        points[i] = n;
    }
    Ok(points)
}

pub(super) fn stroke_style(field: &Field<'_>, value: &Value) -> Result<StrokeStyle, ResolveError> {
    match value {
        Value::Object(obj) => {
            let dash_field = field.key("dashArray");
            let dashes = obj
                .get("dashArray")
                .and_then(Value::as_array)
                .ok_or_else(|| dash_field.error("expected an array of dimensions"))?;
            let dash_array = dashes
                .iter()
                .enumerate()
                .map(|(i, d)| dimension(&dash_field.index(i), d))
                .collect::<Result<Vec<_>, _>>()?;

            let cap_field = field.key("lineCap");
            let line_cap = obj
                .get("lineCap")
                .ok_or_else(|| cap_field.error("missing"))
                .and_then(|v| cap_field.as_str(v))?;
            if !LINE_CAPS.contains(&line_cap) {
                return Err(cap_field.error(format!("unknown line cap '{}'", line_cap)));
            }
            Ok(StrokeStyle::Dashed { dash_array, line_cap: line_cap.to_string() })
        }
        _ => {
            let keyword = field.as_str(value)?;
            if !STROKE_KEYWORDS.contains(&keyword) {
                return Err(field.error(format!("unknown stroke style '{}'", keyword)));
            }
            Ok(StrokeStyle::Keyword(keyword.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenType;
    use serde_json::json;

    fn field(ty: TokenType) -> Field<'static> {
        Field::root("t", ty, None)
    }

    #[test]
    fn test_dimension_numbers() {
        let f = field(TokenType::Dimension);
        assert_eq!(dimension(&f, &json!(0)).unwrap(), "0");
        assert_eq!(dimension(&f, &json!(16)).unwrap(), "16px");
        assert_eq!(dimension(&f, &json!(" 1.5rem ")).unwrap(), "1.5rem");
        assert!(dimension(&f, &json!(true)).is_err());
        assert!(dimension(&f, &json!("")).is_err());
    }

    #[test]
    fn test_duration_numbers() {
        let f = field(TokenType::Duration);
        assert_eq!(duration(&f, &json!(150)).unwrap(), "150ms");
        assert_eq!(duration(&f, &json!("0.2s")).unwrap(), "0.2s");
    }

    #[test]
    fn test_font_weight() {
        let f = field(TokenType::FontWeight);
        assert_eq!(font_weight(&f, &json!(400)).unwrap(), 400);
        assert_eq!(font_weight(&f, &json!("600")).unwrap(), 600);
        assert_eq!(font_weight(&f, &json!("Semi-Bold")).unwrap(), 600);
        assert_eq!(font_weight(&f, &json!("extra_light")).unwrap(), 200);
        assert!(font_weight(&f, &json!(0)).is_err());
        assert!(font_weight(&f, &json!(450.5)).is_err());
        assert!(font_weight(&f, &json!("chunky")).is_err());
    }

    #[test]
    fn test_font_list() {
        let f = field(TokenType::Font);
        assert_eq!(font(&f, &json!("Inter")).unwrap(), vec!["Inter"]);
        assert_eq!(font(&f, &json!(["Inter", "system-ui"])).unwrap(), vec!["Inter", "system-ui"]);
        assert!(font(&f, &json!([])).is_err());
        let err = font(&f, &json!(["Inter", 3])).unwrap_err();
        assert!(matches!(err, ResolveError::Type { ref field, .. } if field == "$value[1]"));
    }

    #[test]
    fn test_cubic_bezier_ranges() {
        let f = field(TokenType::CubicBezier);
        assert_eq!(cubic_bezier(&f, &json!([0.33, 1, 0.68, 1])).unwrap(), [0.33, 1.0, 0.68, 1.0]);
        // y coordinates may overshoot
        assert_eq!(cubic_bezier(&f, &json!([0.5, -0.5, 0.5, 1.5])).unwrap(), [0.5, -0.5, 0.5, 1.5]);
        assert!(cubic_bezier(&f, &json!([1.2, 0, 0.5, 1])).is_err());
        assert!(cubic_bezier(&f, &json!([0, 0, 1])).is_err());
        assert!(cubic_bezier(&f, &json!("ease")).is_err());
    }

    #[test]
    fn test_stroke_style() {
        let f = field(TokenType::StrokeStyle);
        assert_eq!(stroke_style(&f, &json!("dashed")).unwrap(), StrokeStyle::Keyword("dashed".into()));
        assert_eq!(
            stroke_style(&f, &json!({ "dashArray": [2, "4px"], "lineCap": "round" })).unwrap(),
            StrokeStyle::Dashed { dash_array: vec!["2px".into(), "4px".into()], line_cap: "round".into() }
        );
        assert!(stroke_style(&f, &json!("wavy")).is_err());
        assert!(stroke_style(&f, &json!({ "dashArray": [], "lineCap": "pointy" })).is_err());
    }

    #[test]
    fn test_color_normalized() {
        let f = field(TokenType::Color);
        assert_eq!(color(&f, &json!("#ABCDEF")).unwrap(), "#abcdef");
        assert!(color(&f, &json!(12)).is_err());
    }
}
