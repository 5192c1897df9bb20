//! Token document parsing
//!
//! Classifies every node of a JSON document as a group or a token by shape:
//! a node holding a `$value` key is a token, any other object is a group.
//! `$type` declared on a group is inherited by descendant tokens that omit
//! their own, closest ancestor first.
//!
//! Parsing builds the tree only. Aliases stay in place and values are not
//! normalized.

use crate::error::ResolveError;
use crate::models::{Group, GroupMeta, Metadata, Node, RawToken, Token, TokenDocument, TokenType};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Key reserved for the baseline value in mode lookups.
pub const DEFAULT_MODE: &str = "default";

/// Parse a JSON token document into an unresolved token tree.
///
/// # Errors
///
/// Returns [`ResolveError::Schema`] when the document or a node is malformed,
/// when a token's type cannot be determined, or when `$type` is not a
/// recognized token type.
pub fn parse_document(document: &Value) -> Result<TokenDocument, ResolveError> {
    let obj = document
        .as_object()
        .ok_or_else(|| ResolveError::schema("", "document root must be an object"))?;

    let metadata = parse_metadata(obj)?;
    let root = parse_group(String::new(), "", obj, None)?;

    Ok(TokenDocument { metadata, root })
}

/// Parse a JSON string into an unresolved token tree.
pub fn parse_str(source: &str) -> Result<TokenDocument, ResolveError> {
    let value: Value =
        serde_json::from_str(source).map_err(|e| ResolveError::schema("", e.to_string()))?;
    parse_document(&value)
}

fn parse_metadata(obj: &Map<String, Value>) -> Result<Metadata, ResolveError> {
    let mut metadata = Metadata::default();
    for (key, value) in obj {
        let Some(prop) = key.strip_prefix('$') else { continue };
        match prop {
            "name" => metadata.name = Some(expect_string("", key, value)?),
            "description" => metadata.description = Some(expect_string("", key, value)?),
            "type" | "extensions" => {}
            _ => {
                metadata.extra.insert(prop.to_string(), value.clone());
            }
        }
    }
    Ok(metadata)
}

fn parse_group(
    name: String,
    path: &str,
    obj: &Map<String, Value>,
    inherited: Option<TokenType>,
) -> Result<Group, ResolveError> {
    let declared = match obj.get("$type") {
        Some(v) => Some(parse_type(path, v)?),
        None => None,
    };
    let description = match obj.get("$description") {
        Some(v) => Some(expect_string(path, "$description", v)?),
        None => None,
    };
    let extensions = match obj.get("$extensions") {
        Some(v) => expect_object(path, "$extensions", v)?.clone(),
        None => Map::new(),
    };

    let meta = Arc::new(GroupMeta {
        id: path.to_string(),
        description,
        token_type: declared,
        extensions,
    });
    let inherited = declared.or(inherited);

    let mut children = Vec::new();
    for (key, child) in obj {
        if key.starts_with('$') {
            continue;
        }
        let child_path = join_path(path, key);
        validate_name(&child_path, key)?;

        let child_obj = child.as_object().ok_or_else(|| {
            ResolveError::schema(&child_path, "expected a group or token object")
        })?;

        if child_obj.contains_key("$value") {
            if let Some(nested) = child_obj.iter().find(|(k, v)| !k.starts_with('$') && v.is_object()) {
                return Err(ResolveError::schema(
                    &child_path,
                    format!("token cannot also contain child node '{}'", nested.0),
                ));
            }
            let token = parse_token(key, &child_path, child_obj, inherited, Arc::clone(&meta))?;
            children.push(Node::Token(token));
        } else {
            let group = parse_group(key.clone(), &child_path, child_obj, inherited)?;
            children.push(Node::Group(group));
        }
    }

    Ok(Group { name, meta, children })
}

fn parse_token(
    name: &str,
    id: &str,
    obj: &Map<String, Value>,
    inherited: Option<TokenType>,
    group: Arc<GroupMeta>,
) -> Result<RawToken, ResolveError> {
    let token_type = match obj.get("$type") {
        Some(v) => parse_type(id, v)?,
        None => inherited.ok_or_else(|| {
            ResolveError::schema(id, "token has no $type and none is inherited from a group")
        })?,
    };

    let description = match obj.get("$description") {
        Some(v) => Some(expect_string(id, "$description", v)?),
        None => None,
    };

    let mut extensions = match obj.get("$extensions") {
        Some(v) => expect_object(id, "$extensions", v)?.clone(),
        None => Map::new(),
    };

    let mut modes = IndexMap::new();
    if let Some(mode_value) = extensions.remove("mode") {
        let mode_obj = expect_object(id, "$extensions.mode", &mode_value)?;
        for (mode, value) in mode_obj {
            if mode == DEFAULT_MODE {
                return Err(ResolveError::schema(
                    id,
                    "mode name 'default' is reserved for the baseline $value",
                ));
            }
            if mode.is_empty() || mode.contains(['#', '{', '}']) || mode.contains(char::is_whitespace) {
                return Err(ResolveError::schema(id, format!("invalid mode name '{}'", mode)));
            }
            modes.insert(mode.clone(), value.clone());
        }
    }

    Ok(Token {
        id: id.to_string(),
        name: name.to_string(),
        token_type,
        description,
        value: obj.get("$value").cloned().unwrap_or(Value::Null),
        modes,
        extensions,
        group,
        original: Value::Object(obj.clone()),
    })
}

fn parse_type(path: &str, value: &Value) -> Result<TokenType, ResolveError> {
    let s = value
        .as_str()
        .ok_or_else(|| ResolveError::schema(path, "$type must be a string"))?;
    TokenType::parse(s).ok_or_else(|| ResolveError::schema(path, format!("unknown $type '{}'", s)))
}

fn validate_name(path: &str, name: &str) -> Result<(), ResolveError> {
    if name.is_empty() {
        return Err(ResolveError::schema(path, "empty token or group name"));
    }
    if let Some(c) = name.chars().find(|c| matches!(c, '.' | '{' | '}' | '#')) {
        return Err(ResolveError::schema(path, format!("name '{}' contains reserved character '{}'", name, c)));
    }
    if name.contains(char::is_whitespace) {
        return Err(ResolveError::schema(path, format!("name '{}' contains whitespace", name)));
    }
    Ok(())
}

fn expect_string(path: &str, key: &str, value: &Value) -> Result<String, ResolveError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ResolveError::schema(path, format!("{} must be a string", key)))
}

fn expect_object<'a>(
    path: &str,
    key: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, ResolveError> {
    value
        .as_object()
        .ok_or_else(|| ResolveError::schema(path, format!("{} must be an object", key)))
}

/// Join a parent path and a child name with a dot.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}
