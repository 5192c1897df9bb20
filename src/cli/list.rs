//! List command implementation

use std::path::Path;
use std::process::ExitCode;

use super::check::resolve_sources;
use super::{SourceArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::models::TokenType;

/// Run the list command
pub fn run_list(config_path: Option<&Path>, sources: &SourceArgs, filter: Option<&str>) -> ExitCode {
    let filter = match filter.map(|f| (f, TokenType::parse(f))) {
        None => None,
        Some((_, Some(ty))) => Some(ty),
        Some((name, None)) => {
            let known: Vec<&str> = TokenType::ALL.iter().map(|t| t.as_str()).collect();
            eprintln!("Error: unknown token type '{}' (expected one of: {})", name, known.join(", "));
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let tokens = match resolve_sources(config_path, sources) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for token in tokens.tokens.iter().filter(|t| filter.map_or(true, |ty| t.token_type == ty)) {
        let modes: Vec<&str> = token.mode_names().collect();
        if modes.is_empty() {
            println!("{}\t{}", token.id, token.token_type);
        } else {
            println!("{}\t{}\t[{}]", token.id, token.token_type, modes.join(", "));
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
