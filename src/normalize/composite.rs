//! Multi-part token types: border, shadow, gradient, transition, typography

use super::scalar;
use super::{describe, Field};
use crate::error::ResolveError;
use crate::models::{Border, GradientStop, ShadowLayer, Transition, TypographyProperty};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

fn as_object<'v>(field: &Field<'_>, value: &'v Value) -> Result<&'v Map<String, Value>, ResolveError> {
    value
        .as_object()
        .ok_or_else(|| field.error(format!("expected an object, found {}", describe(value))))
}

fn required<'v>(
    field: &Field<'_>,
    obj: &'v Map<String, Value>,
    key: &str,
) -> Result<&'v Value, ResolveError> {
    obj.get(key).ok_or_else(|| field.key(key).error("missing required field"))
}

pub(super) fn border(field: &Field<'_>, value: &Value) -> Result<Border, ResolveError> {
    let obj = as_object(field, value)?;
    Ok(Border {
        color: scalar::color(&field.key("color"), required(field, obj, "color")?)?,
        width: scalar::dimension(&field.key("width"), required(field, obj, "width")?)?,
        style: scalar::stroke_style(&field.key("style"), required(field, obj, "style")?)?,
    })
}

/// A single shadow object or an array of them.
pub(super) fn shadow(field: &Field<'_>, value: &Value) -> Result<Vec<ShadowLayer>, ResolveError> {
    match value {
        Value::Array(layers) if layers.is_empty() => Err(field.error("shadow has no layers")),
        Value::Array(layers) => layers
            .iter()
            .enumerate()
            .map(|(i, layer)| shadow_layer(&field.index(i), layer))
            .collect(),
        _ => Ok(vec![shadow_layer(field, value)?]),
    }
}

fn shadow_layer(field: &Field<'_>, value: &Value) -> Result<ShadowLayer, ResolveError> {
    let obj = as_object(field, value)?;
    let optional_dimension = |key: &str| -> Result<String, ResolveError> {
        match obj.get(key) {
            Some(v) => scalar::dimension(&field.key(key), v),
            None => Ok("0".to_string()),
        }
    };
    let inset = match obj.get("inset") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            return Err(field.key("inset").error(format!("expected a boolean, found {}", describe(other))))
        }
    };

    Ok(ShadowLayer {
        offset_x: scalar::dimension(&field.key("offsetX"), required(field, obj, "offsetX")?)?,
        offset_y: scalar::dimension(&field.key("offsetY"), required(field, obj, "offsetY")?)?,
        blur: optional_dimension("blur")?,
        spread: optional_dimension("spread")?,
        color: scalar::color(&field.key("color"), required(field, obj, "color")?)?,
        inset,
    })
}

pub(super) fn gradient(field: &Field<'_>, value: &Value) -> Result<Vec<GradientStop>, ResolveError> {
    let stops = value
        .as_array()
        .ok_or_else(|| field.error(format!("expected an array of stops, found {}", describe(value))))?;
    if stops.is_empty() {
        return Err(field.error("gradient has no stops"));
    }

    stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let stop_field = field.index(i);
            let obj = as_object(&stop_field, stop)?;
            let color = scalar::color(&stop_field.key("color"), required(&stop_field, obj, "color")?)?;
            let position_field = stop_field.key("position");
            let position = position_field.as_number(required(&stop_field, obj, "position")?)?;
            if !(0.0..=1.0).contains(&position) {
                return Err(position_field.error(format!("position {} must be within [0, 1]", position)));
            }
            Ok(GradientStop { color, position })
        })
        .collect()
}

pub(super) fn transition(field: &Field<'_>, value: &Value) -> Result<Transition, ResolveError> {
    let obj = as_object(field, value)?;
    let duration = scalar::duration(&field.key("duration"), required(field, obj, "duration")?)?;
    let delay = match obj.get("delay") {
        Some(v) => scalar::duration(&field.key("delay"), v)?,
        None => "0ms".to_string(),
    };
    let timing_function = match obj.get("timingFunction") {
        Some(v) => Some(scalar::cubic_bezier(&field.key("timingFunction"), v)?),
        None => None,
    };
    Ok(Transition { duration, delay, timing_function })
}

pub(super) fn typography(
    field: &Field<'_>,
    value: &Value,
) -> Result<BTreeMap<String, TypographyProperty>, ResolveError> {
    let obj = as_object(field, value)?;
    let mut properties = BTreeMap::new();

    for (key, raw) in obj {
        let name = kebab_case(key);
        let prop_field = field.key(key);
        let property = match name.as_str() {
            "font-family" => TypographyProperty::List(scalar::font(&prop_field, raw)?),
            "font-weight" => TypographyProperty::Number(f64::from(scalar::font_weight(&prop_field, raw)?)),
            _ => match raw {
                Value::Number(n) => TypographyProperty::Number(n.as_f64().unwrap_or(0.0)),
                Value::Array(_) => TypographyProperty::List(scalar::font(&prop_field, raw)?),
                _ => TypographyProperty::Text(prop_field.as_str(raw)?.to_string()),
            },
        };
        if properties.insert(name.clone(), property).is_some() {
            return Err(prop_field.error(format!("duplicate typography property '{}'", name)));
        }
    }

    Ok(properties)
}

/// Convert a camelCase or snake_case property name to kebab-case.
///
/// ```
/// use tokenweave::normalize::kebab_case;
///
/// assert_eq!(kebab_case("fontFamily"), "font-family");
/// assert_eq!(kebab_case("letter_spacing"), "letter-spacing");
/// assert_eq!(kebab_case("line-height"), "line-height");
/// assert_eq!(kebab_case("fontSizeXL"), "font-size-xl");
/// ```
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == ' ' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        } else if c.is_uppercase() {
            // A run of capitals is one word; its last capital may start the next
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
