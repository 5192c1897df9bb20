//! Alias resolution for token values
//!
//! An alias is a string of the form `{path.to.token}` or
//! `{path.to.token#mode}`, anywhere inside a `$value` or a mode override:
//! at the top level, inside arrays, or in fields of composite values.
//!
//! Resolution builds an explicit graph whose nodes are (token, mode slot)
//! pairs and whose edges are the aliases found in each slot's raw value. A
//! depth-first walk with in-progress/done coloring detects cycles; each node's
//! value is computed exactly once, after all its targets, so the result does
//! not depend on traversal order.
//!
//! # Example
//!
//! ```
//! use tokenweave::parser::parse_document;
//! use tokenweave::resolve::resolve_aliases;
//! use serde_json::json;
//!
//! let mut doc = parse_document(&json!({
//!     "$type": "color",
//!     "red": { "$value": "#ff0000" },
//!     "brand": { "$value": "{red}" }
//! })).unwrap();
//!
//! resolve_aliases(&mut doc.root).unwrap();
//! let mut values = Vec::new();
//! doc.root.for_each_token(&mut |t| values.push(t.value.clone()));
//! assert_eq!(values, vec![json!("#ff0000"), json!("#ff0000")]);
//! ```

use crate::error::ResolveError;
use crate::models::Group;
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

static ALIAS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{\s*([^{}#\s]+)\s*(?:#\s*([^{}#\s]+)\s*)?\}$").expect("alias pattern is valid")
});

/// A parsed alias reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRef {
    /// Target token id
    pub id: String,
    /// Requested mode, if mode-qualified
    pub mode: Option<String>,
}

impl AliasRef {
    /// Parse a string as an alias. Only a whole-string `{...}` is an alias.
    ///
    /// ```
    /// use tokenweave::resolve::AliasRef;
    ///
    /// let alias = AliasRef::parse("{color.bg#dark}").unwrap();
    /// assert_eq!(alias.id, "color.bg");
    /// assert_eq!(alias.mode.as_deref(), Some("dark"));
    /// assert!(AliasRef::parse("1px solid {color.border}").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let caps = ALIAS_PATTERN.captures(s.trim())?;
        Some(AliasRef {
            id: caps.get(1)?.as_str().to_string(),
            mode: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }
}

/// Collect every alias inside a value tree, in document order.
pub fn collect_aliases(value: &Value, out: &mut Vec<AliasRef>) {
    match value {
        Value::String(s) => {
            if let Some(alias) = AliasRef::parse(s) {
                out.push(alias);
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_aliases(v, out)),
        Value::Object(fields) => fields.values().for_each(|v| collect_aliases(v, out)),
        _ => {}
    }
}

/// Token-level alias adjacency: token id to the ids it references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl AliasGraph {
    /// Ids referenced by a token's default value or any of its modes.
    pub fn dependencies(&self, id: &str) -> impl Iterator<Item = &str> {
        self.edges.get(id).into_iter().flat_map(|set| set.iter().map(|s| s.as_str()))
    }

    /// Number of token-to-token edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|deps| deps.len()).sum()
    }
}

/// A value slot in the alias graph: a token's default value or one mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodeKey {
    id: String,
    mode: Option<String>,
}

impl NodeKey {
    fn label(&self) -> String {
        match &self.mode {
            Some(mode) => format!("{}#{}", self.id, mode),
            None => self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

struct Resolver {
    /// Token id -> mode names the token defines
    modes: HashMap<String, IndexSet<String>>,
    raw: HashMap<NodeKey, Value>,
    edges: HashMap<NodeKey, Vec<NodeKey>>,
    state: HashMap<NodeKey, VisitState>,
    resolved: HashMap<NodeKey, Value>,
}

impl Resolver {
    fn new(root: &Group) -> Result<(Self, Vec<NodeKey>, AliasGraph), ResolveError> {
        let mut modes: HashMap<String, IndexSet<String>> = HashMap::new();
        root.for_each_token(&mut |t| {
            modes.insert(t.id.clone(), t.modes.keys().cloned().collect());
        });

        let mut resolver = Resolver {
            modes,
            raw: HashMap::new(),
            edges: HashMap::new(),
            state: HashMap::new(),
            resolved: HashMap::new(),
        };

        let mut order = Vec::new();
        let mut graph = AliasGraph::default();
        let mut error = None;
        root.for_each_token(&mut |t| {
            if error.is_some() {
                return;
            }
            let deps = graph.edges.entry(t.id.clone()).or_default();
            let slots = std::iter::once((None, &t.value))
                .chain(t.modes.iter().map(|(m, v)| (Some(m.clone()), v)));
            for (mode, value) in slots {
                let key = NodeKey { id: t.id.clone(), mode };
                let mut aliases = Vec::new();
                collect_aliases(value, &mut aliases);

                let mut targets = Vec::with_capacity(aliases.len());
                for alias in &aliases {
                    match resolver.target_key(alias) {
                        Some(target) => {
                            deps.insert(target.id.clone());
                            targets.push(target);
                        }
                        None => {
                            error = Some(ResolveError::UnknownToken {
                                from: t.id.clone(),
                                missing: alias.id.clone(),
                            });
                            return;
                        }
                    }
                }

                resolver.raw.insert(key.clone(), value.clone());
                resolver.edges.insert(key.clone(), targets);
                order.push(key);
            }
        });

        match error {
            Some(e) => Err(e),
            None => Ok((resolver, order, graph)),
        }
    }

    /// Map an alias to the graph node it reads. A mode the target does not
    /// define falls back to the target's default value.
    fn target_key(&self, alias: &AliasRef) -> Option<NodeKey> {
        let modes = self.modes.get(&alias.id)?;
        let mode = alias.mode.as_ref().filter(|m| modes.contains(m.as_str())).cloned();
        Some(NodeKey { id: alias.id.clone(), mode })
    }

    /// Resolve `start` and everything it reaches.
    ///
    /// Walks the graph with an explicit stack of (node, next edge) frames, so
    /// chain length is bounded only by the document.
    fn visit(&mut self, start: &NodeKey) -> Result<(), ResolveError> {
        if self.state.contains_key(start) {
            return Ok(());
        }
        self.state.insert(start.clone(), VisitState::InProgress);
        let mut stack: Vec<(NodeKey, usize)> = vec![(start.clone(), 0)];

        while let Some((key, next)) = stack.last_mut() {
            let target = self.edges.get(&*key).and_then(|targets| targets.get(*next)).cloned();
            *next += 1;

            match target {
                Some(target) => match self.state.get(&target).copied() {
                    Some(VisitState::Done) => {}
                    Some(VisitState::InProgress) => {
                        let from = stack.iter().position(|(k, _)| *k == target).unwrap_or(0);
                        let mut cycle: Vec<String> = stack[from..].iter().map(|(k, _)| k.label()).collect();
                        cycle.push(target.label());
                        return Err(ResolveError::CircularReference { cycle });
                    }
                    None => {
                        self.state.insert(target.clone(), VisitState::InProgress);
                        stack.push((target, 0));
                    }
                },
                None => {
                    let key = key.clone();
                    stack.pop();
                    let raw = self.raw.get(&key).cloned().unwrap_or(Value::Null);
                    let value = self.substitute(&raw);
                    self.resolved.insert(key.clone(), value);
                    self.state.insert(key, VisitState::Done);
                }
            }
        }
        Ok(())
    }

    /// Replace aliases with their targets' already-resolved values.
    fn substitute(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => match AliasRef::parse(s).and_then(|a| self.target_key(&a)) {
                Some(target) => self.resolved.get(&target).cloned().unwrap_or(Value::Null),
                None => value.clone(),
            },
            Value::Array(items) => Value::Array(items.iter().map(|v| self.substitute(v)).collect()),
            Value::Object(fields) => Value::Object(
                fields.iter().map(|(k, v)| (k.clone(), self.substitute(v))).collect(),
            ),
            _ => value.clone(),
        }
    }
}

/// Replace every alias in the tree with the value it points to.
///
/// Returns the token-level alias graph for diagnostics. Resolving an already
/// resolved tree is a no-op.
///
/// # Errors
///
/// - [`ResolveError::UnknownToken`] when an alias targets a missing token
/// - [`ResolveError::CircularReference`] when a token transitively aliases
///   itself; the error carries the cycle path, e.g. `a, b, c, a`
pub fn resolve_aliases(root: &mut Group) -> Result<AliasGraph, ResolveError> {
    let (mut resolver, order, graph) = Resolver::new(root)?;

    for key in &order {
        resolver.visit(key)?;
    }

    root.for_each_token_mut(&mut |t| {
        let key = NodeKey { id: t.id.clone(), mode: None };
        if let Some(v) = resolver.resolved.remove(&key) {
            t.value = v;
        }
        for (mode, value) in t.modes.iter_mut() {
            let key = NodeKey { id: t.id.clone(), mode: Some(mode.clone()) };
            if let Some(v) = resolver.resolved.remove(&key) {
                *value = v;
            }
        }
    });

    tracing::debug!(nodes = order.len(), edges = graph.edge_count(), "resolved aliases");
    Ok(graph)
}
