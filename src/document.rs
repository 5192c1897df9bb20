//! Token document loading and end-to-end resolution
//!
//! Token sources are JSON files (JSON5 for the `.json5` extension). Several
//! sources deep-merge into one document in the order given: objects merge
//! key-by-key, later files replace earlier scalars and arrays, and key order is
//! first-seen order.
//!
//! [`resolve_document`] runs the synchronous resolution stages in order:
//! parse, resolve aliases, normalize, flatten.

use crate::error::ResolveError;
use crate::flatten::flatten;
use crate::models::ResolvedTokens;
use crate::normalize::normalize_tree;
use crate::parser::parse_document;
use crate::resolve::resolve_aliases;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error reading or decoding a token source file
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("{}: token document root must be an object", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("no token sources given")]
    NoSources,
}

/// Read and decode one token file.
pub fn load_file(path: &Path) -> Result<Value, DocumentError> {
    let text = fs::read_to_string(path)
        .map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })?;

    let is_json5 = path.extension().and_then(|e| e.to_str()) == Some("json5");
    let value: Value = if is_json5 {
        json5::from_str(&text)
            .map_err(|e| DocumentError::Parse { path: path.to_path_buf(), message: e.to_string() })?
    } else {
        serde_json::from_str(&text)
            .map_err(|e| DocumentError::Parse { path: path.to_path_buf(), message: e.to_string() })?
    };

    if !value.is_object() {
        return Err(DocumentError::NotAnObject { path: path.to_path_buf() });
    }
    Ok(value)
}

/// Load and deep-merge token files in order.
pub fn load_documents(paths: &[PathBuf]) -> Result<Value, DocumentError> {
    if paths.is_empty() {
        return Err(DocumentError::NoSources);
    }

    let mut merged = Value::Object(Map::new());
    for path in paths {
        let doc = load_file(path)?;
        tracing::debug!(path = %path.display(), "loaded token source");
        merge_into(&mut merged, doc);
    }
    Ok(merged)
}

/// Deep-merge `overlay` into `base`.
///
/// ```
/// use tokenweave::document::merge_into;
/// use serde_json::json;
///
/// let mut base = json!({ "color": { "red": { "$value": "#f00" } } });
/// merge_into(&mut base, json!({ "color": { "blue": { "$value": "#00f" } } }));
/// assert_eq!(base["color"].as_object().unwrap().len(), 2);
/// ```
pub fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Resolve a token document into the flat, alias-free, normalized model.
///
/// # Errors
///
/// Returns the first [`ResolveError`] from any stage; there is no partial
/// result.
pub fn resolve_document(document: &Value) -> Result<ResolvedTokens, ResolveError> {
    let mut doc = parse_document(document)?;
    resolve_aliases(&mut doc.root)?;
    let normalized = normalize_tree(doc.root)?;
    let tokens = flatten(normalized)?;
    tracing::debug!(tokens = tokens.len(), "resolved token document");
    Ok(ResolvedTokens { metadata: doc.metadata, tokens })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TokenType, TokenValue};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_merge_later_wins_and_keeps_first_seen_order() {
        let mut base = json!({ "a": { "x": 1, "y": 2 }, "b": [1, 2] });
        merge_into(&mut base, json!({ "a": { "y": 3, "z": 4 }, "b": [9], "c": true }));
        assert_eq!(base, json!({ "a": { "x": 1, "y": 3, "z": 4 }, "b": [9], "c": true }));
        let keys: Vec<_> = base["a"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_merge_token_over_group_is_rejected() {
        let mut base = json!({ "space": { "$type": "dimension", "sm": { "$value": 4 } } });
        merge_into(&mut base, json!({ "space": { "$value": 8 } }));
        let err = resolve_document(&base).unwrap_err();
        assert!(matches!(err, ResolveError::Schema { ref path, .. } if path == "space"));
    }

    #[test]
    fn test_load_json_and_json5() {
        let dir = TempDir::new().unwrap();
        let json_path = dir.path().join("base.json");
        fs::write(&json_path, r##"{ "color": { "$type": "color", "red": { "$value": "#f00" } } }"##).unwrap();
        let json5_path = dir.path().join("theme.json5");
        fs::write(
            &json5_path,
            "// theme overrides\n{ color: { blue: { \"$value\": '#00f', }, }, }",
        )
        .unwrap();

        let merged = load_documents(&[json_path, json5_path]).unwrap();
        let resolved = resolve_document(&merged).unwrap();
        let ids: Vec<_> = resolved.tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["color.red", "color.blue"]);
        assert_eq!(resolved.tokens[1].token_type, TokenType::Color);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_file(&missing), Err(DocumentError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ nope").unwrap();
        assert!(matches!(load_file(&bad), Err(DocumentError::Parse { .. })));

        let array = dir.path().join("array.json");
        fs::write(&array, "[1]").unwrap();
        assert!(matches!(load_file(&array), Err(DocumentError::NotAnObject { .. })));

        assert!(matches!(load_documents(&[]), Err(DocumentError::NoSources)));
    }

    #[test]
    fn test_resolve_document_end_to_end() {
        let resolved = resolve_document(&json!({
            "$name": "demo",
            "color": {
                "$type": "color",
                "base": { "$value": "#FFFFFF", "$extensions": { "mode": { "dark": "#000" } } },
                "surface": { "$value": "{color.base}", "$extensions": { "mode": { "dark": "{color.base#dark}" } } }
            }
        }))
        .unwrap();
        assert_eq!(resolved.metadata.name.as_deref(), Some("demo"));
        let surface = resolved.get("color.surface").unwrap();
        assert_eq!(surface.value, TokenValue::Color("#ffffff".into()));
        assert_eq!(surface.modes["dark"], TokenValue::Color("#000000".into()));
        assert_eq!(surface.group.id, "color");
    }
}
