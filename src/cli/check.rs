//! Check command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{load_project, SourceArgs, EXIT_ERROR, EXIT_SUCCESS};
use crate::build::BuildError;
use crate::document::{load_documents, resolve_document};
use crate::models::ResolvedTokens;

/// Load and resolve the configured token sources.
pub(crate) fn resolve_sources(
    config_path: Option<&Path>,
    sources: &SourceArgs,
) -> Result<ResolvedTokens, BuildError> {
    let config = load_project(config_path, sources, None)?;
    let document = load_documents(&config.tokens)?;
    Ok(resolve_document(&document)?)
}

/// Run the check command
pub fn run_check(config_path: Option<&Path>, sources: &SourceArgs) -> ExitCode {
    match resolve_sources(config_path, sources) {
        Ok(tokens) => {
            let name = tokens.metadata.name.as_deref().unwrap_or("token document");
            println!("{}: {} tokens OK", name, tokens.len());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
