//! Plugin contract
//!
//! A plugin turns the resolved token list into output artifacts. It has one
//! required step, [`Plugin::build`], and one optional step,
//! [`Plugin::config`], whose default does nothing.
//!
//! # Example
//!
//! ```
//! use tokenweave::plugin::{BuildArtifact, BuildInput, Plugin, PluginFailure};
//!
//! struct IdList;
//!
//! impl Plugin for IdList {
//!     fn name(&self) -> &str {
//!         "id-list"
//!     }
//!
//!     fn build(&self, input: &BuildInput<'_>) -> Result<Vec<BuildArtifact>, PluginFailure> {
//!         let ids: Vec<&str> = input.tokens.iter().map(|t| t.id.as_str()).collect();
//!         Ok(vec![BuildArtifact::text("ids.txt", ids.join("\n"))])
//!     }
//! }
//! ```

use crate::config::ResolvedConfig;
use crate::models::{Metadata, Token};
use std::fmt;
use thiserror::Error;

/// Underlying cause of a plugin failure.
pub type PluginFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a plugin's build step receives.
#[derive(Debug, Clone, Copy)]
pub struct BuildInput<'a> {
    /// Resolved tokens in source declaration order
    pub tokens: &'a [Token],
    /// Document-level metadata
    pub metadata: &'a Metadata,
}

/// Contents of an output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    Text(String),
    Bytes(Vec<u8>),
}

impl Contents {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Contents::Text(s) => s.as_bytes(),
            Contents::Bytes(b) => b,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Contents::Text(s) => Some(s),
            Contents::Bytes(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One file emitted by a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    /// Path relative to the output directory; may contain subdirectories
    pub filename: String,
    pub contents: Contents,
}

impl BuildArtifact {
    pub fn text(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self { filename: filename.into(), contents: Contents::Text(contents.into()) }
    }

    pub fn bytes(filename: impl Into<String>, contents: Vec<u8>) -> Self {
        Self { filename: filename.into(), contents: Contents::Bytes(contents) }
    }
}

/// A token output plugin.
///
/// Plugins must not share mutable state; the pipeline may run several build
/// steps at once.
pub trait Plugin: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Configure phase: copy whatever the plugin needs out of the config.
    ///
    /// Runs once, before any build step, in registration order.
    fn config(&mut self, _config: &ResolvedConfig) -> Result<(), PluginFailure> {
        Ok(())
    }

    /// Build phase: produce output artifacts from the resolved tokens.
    fn build(&self, input: &BuildInput<'_>) -> Result<Vec<BuildArtifact>, PluginFailure>;
}

/// Phase a plugin failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginPhase {
    Config,
    Build,
}

impl fmt::Display for PluginPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginPhase::Config => write!(f, "config"),
            PluginPhase::Build => write!(f, "build"),
        }
    }
}

/// A plugin failure annotated with the plugin's name.
#[derive(Debug, Error)]
#[error("plugin '{plugin}' failed during {phase}: {source}")]
pub struct PluginError {
    pub plugin: String,
    pub phase: PluginPhase,
    #[source]
    pub source: PluginFailure,
}

impl PluginError {
    pub fn new(plugin: &str, phase: PluginPhase, source: PluginFailure) -> Self {
        Self { plugin: plugin.to_string(), phase, source }
    }
}
