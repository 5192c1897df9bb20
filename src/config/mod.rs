//! Configuration module for the tokenweave build
//!
//! Provides types and parsing for `tokenweave.toml` project configuration,
//! and the immutable [`ResolvedConfig`] passed to plugins.

pub mod loader;
pub mod resolved;
pub mod schema;

pub use loader::{CliOverrides, ConfigError};
pub use resolved::ResolvedConfig;
pub use schema::*;
