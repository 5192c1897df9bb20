//! Build pipeline module for tokenweave
//!
//! Drives resolved tokens through the configured plugins.
//!
//! # Overview
//!
//! A build consists of:
//! - **Loading**: read and merge the token sources listed in the config
//! - **Resolution**: parse, resolve aliases, normalize and flatten
//! - **Configure**: each plugin reads the immutable config, in order
//! - **Build**: each plugin emits artifacts; results are joined in
//!   registration order
//!
//! # Example
//!
//! ```ignore
//! use tokenweave::build::BuildPipeline;
//! use tokenweave::config::{loader::load_config, ResolvedConfig};
//!
//! let config = ResolvedConfig::resolve(load_config(None)?, &project_root)?;
//! let output = BuildPipeline::from_config(config)?.run()?;
//! println!("Built {} files", output.len());
//! ```

pub mod pipeline;
pub mod result;

pub use pipeline::*;
pub use result::*;

use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::error::ResolveError;
use crate::plugin::PluginError;
use thiserror::Error;

/// Error during a build. The first error aborts the whole build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Plugin(#[from] PluginError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
