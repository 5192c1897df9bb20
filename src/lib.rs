//! Tokenweave - design token resolver and build pipeline
//!
//! This library provides functionality to:
//! - Parse hierarchical design token documents (JSON / JSON5)
//! - Resolve aliases, including mode-qualified ones, with cycle detection
//! - Normalize every value into a typed, canonical form
//! - Run output plugins (Sass, JSON, or your own) over the flat token list

pub mod build;
pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod flatten;
pub mod models;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod plugin;
pub mod plugins;
pub mod resolve;
pub mod transforms;
