//! Tree flattening
//!
//! Walks the normalized token tree depth-first and produces the ordered list of
//! token records plugins consume. Declaration order is preserved: it decides
//! the order of everything generated downstream.

use crate::error::ResolveError;
use crate::models::{Group, Node, Token, TokenValue};
use crate::parser::join_path;
use std::collections::HashSet;

/// Flatten a normalized tree into tokens in source declaration order.
///
/// Each token's id is recomputed as the dot-joined path of names from the root.
///
/// # Errors
///
/// Returns [`ResolveError::DuplicateToken`] if two tokens end up with the same
/// id.
pub fn flatten(root: Group<TokenValue>) -> Result<Vec<Token>, ResolveError> {
    let mut tokens = Vec::new();
    let mut seen = HashSet::new();
    flatten_into(root, "", &mut tokens, &mut seen)?;
    Ok(tokens)
}

fn flatten_into(
    group: Group<TokenValue>,
    path: &str,
    out: &mut Vec<Token>,
    seen: &mut HashSet<String>,
) -> Result<(), ResolveError> {
    for child in group.children {
        match child {
            Node::Group(g) => {
                let child_path = join_path(path, &g.name);
                flatten_into(g, &child_path, out, seen)?;
            }
            Node::Token(mut t) => {
                let id = join_path(path, &t.name);
                if !seen.insert(id.clone()) {
                    return Err(ResolveError::DuplicateToken { id });
                }
                t.id = id;
                out.push(t);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupMeta, TokenType};
    use indexmap::IndexMap;
    use serde_json::{Map, Value};
    use std::sync::Arc;

    fn token(name: &str) -> Token {
        Token {
            id: String::new(),
            name: name.to_string(),
            token_type: TokenType::Number,
            description: None,
            value: TokenValue::Number(1.0),
            modes: IndexMap::new(),
            extensions: Map::new(),
            group: Arc::new(GroupMeta::default()),
            original: Value::Null,
        }
    }

    fn group(name: &str, children: Vec<Node<TokenValue>>) -> Group<TokenValue> {
        Group { name: name.to_string(), meta: Arc::new(GroupMeta::default()), children }
    }

    #[test]
    fn test_flatten_preserves_declaration_order() {
        let root = group(
            "",
            vec![
                Node::Token(token("z")),
                Node::Group(group("b", vec![Node::Token(token("y")), Node::Token(token("a"))])),
                Node::Token(token("m")),
            ],
        );
        let ids: Vec<_> = flatten(root).unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["z", "b.y", "b.a", "m"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let root = group(
            "",
            vec![
                Node::Group(group("a", vec![Node::Token(token("b"))])),
                Node::Group(group("a", vec![Node::Token(token("b"))])),
            ],
        );
        assert_eq!(flatten(root).unwrap_err(), ResolveError::DuplicateToken { id: "a.b".into() });
    }

    #[test]
    fn test_empty_tree() {
        assert!(flatten(group("", vec![])).unwrap().is_empty());
    }
}
