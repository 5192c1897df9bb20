//! Token tree and flat token records
//!
//! The tree is generic over the value representation so the same shape
//! carries raw JSON (after parsing and alias resolution) and normalized
//! [`TokenValue`]s (after normalization).

use super::{TokenType, TokenValue};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shared metadata of a group, referenced by every descendant token.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupMeta {
    /// Dotted path of the group (empty for the document root)
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `$type` declared on this group, inherited by descendants
    #[serde(rename = "$type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

/// A named group of tokens and nested groups.
#[derive(Debug, Clone)]
pub struct Group<V = Value> {
    pub name: String,
    pub meta: Arc<GroupMeta>,
    /// Children in source declaration order
    pub children: Vec<Node<V>>,
}

/// A child of a group.
#[derive(Debug, Clone)]
pub enum Node<V = Value> {
    Group(Group<V>),
    Token(Token<V>),
}

/// A design token.
///
/// `V` is [`Value`] while the tree is unresolved or resolved-but-raw, and
/// [`TokenValue`] once normalized. The flattened records handed to plugins are
/// `Token<TokenValue>`.
#[derive(Debug, Clone)]
pub struct Token<V = TokenValue> {
    /// Dotted path from the document root
    pub id: String,
    /// Last segment of the id
    pub name: String,
    pub token_type: TokenType,
    pub description: Option<String>,
    /// Default value
    pub value: V,
    /// Mode name to alternate value, in source order
    pub modes: IndexMap<String, V>,
    /// `$extensions` other than `mode`
    pub extensions: Map<String, Value>,
    /// Originating group (lookup only)
    pub group: Arc<GroupMeta>,
    /// The untouched source node
    pub original: Value,
}

/// Unresolved or resolved-but-raw token.
pub type RawToken = Token<Value>;

impl<V> Token<V> {
    /// Look up the value for a mode.
    ///
    /// Returns the mode's value when the token defines that mode, otherwise
    /// the default value. `None` always yields the default value.
    pub fn value_for_mode(&self, mode: Option<&str>) -> &V {
        mode.and_then(|m| self.modes.get(m)).unwrap_or(&self.value)
    }

    /// Mode names in declaration order.
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(|k| k.as_str())
    }

    /// Replace the value representation, keeping everything else.
    pub fn map_values<W, E>(self, mut f: impl FnMut(Option<&str>, V) -> Result<W, E>) -> Result<Token<W>, E> {
        let value = f(None, self.value)?;
        let mut modes = IndexMap::with_capacity(self.modes.len());
        for (name, v) in self.modes {
            let w = f(Some(&name), v)?;
            modes.insert(name, w);
        }
        Ok(Token {
            id: self.id,
            name: self.name,
            token_type: self.token_type,
            description: self.description,
            value,
            modes,
            extensions: self.extensions,
            group: self.group,
            original: self.original,
        })
    }
}

impl<V> Group<V> {
    /// Visit every token in depth-first declaration order.
    pub fn for_each_token<'a>(&'a self, f: &mut impl FnMut(&'a Token<V>)) {
        for child in &self.children {
            match child {
                Node::Group(g) => g.for_each_token(f),
                Node::Token(t) => f(t),
            }
        }
    }

    /// Visit every token mutably in depth-first declaration order.
    pub fn for_each_token_mut(&mut self, f: &mut impl FnMut(&mut Token<V>)) {
        for child in &mut self.children {
            match child {
                Node::Group(g) => g.for_each_token_mut(f),
                Node::Token(t) => f(t),
            }
        }
    }
}

/// Document-level metadata: the root's `$`-prefixed keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other root-level `$` keys, without the `$`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A parsed document: metadata plus the unresolved token tree.
#[derive(Debug, Clone)]
pub struct TokenDocument {
    pub metadata: Metadata,
    pub root: Group<Value>,
}

/// The fully resolved model handed to plugins.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTokens {
    pub metadata: Metadata,
    /// Tokens in source declaration order
    pub tokens: Vec<Token>,
}

impl ResolvedTokens {
    /// Find a token by id.
    pub fn get(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
