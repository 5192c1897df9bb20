//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod check;
mod list;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::loader::{default_config, find_config, load_config, merge_cli_overrides};
use crate::config::{CliOverrides, ConfigError, ResolvedConfig};

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Tokenweave - resolve design tokens and generate stylesheets
#[derive(Parser)]
#[command(name = "tkw")]
#[command(about = "Tokenweave - resolve design tokens and run output plugins")]
#[command(version)]
pub struct Cli {
    /// Path to tokenweave.toml (default: search upward from the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Token source and output selection shared by every command
#[derive(clap::Args, Debug, Default)]
pub struct SourceArgs {
    /// Token files or glob patterns, replacing the configured list
    #[arg(short, long = "tokens", value_name = "PATH", num_args = 1..)]
    pub tokens: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve tokens, run every plugin and write the artifacts
    Build {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output directory (overrides out_dir)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// List the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,

        /// Number of plugins to build in parallel
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Resolve tokens and report errors without running plugins
    Check {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Print every resolved token id with its type
    List {
        #[command(flatten)]
        sources: SourceArgs,

        /// Only list tokens of this type (e.g. color, dimension)
        #[arg(long = "type", value_name = "TYPE")]
        token_type: Option<String>,
    },
}

/// Run an already parsed command line
pub fn run_with(cli: Cli) -> ExitCode {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Build { sources, out, dry_run, jobs } => {
            build::run_build(config_path, &sources, out.as_deref(), dry_run, jobs)
        }
        Commands::Check { sources } => check::run_check(config_path, &sources),
        Commands::List { sources, token_type } => {
            list::run_list(config_path, &sources, token_type.as_deref())
        }
    }
}

/// Load tokenweave.toml (or the defaults) and apply command-line overrides.
///
/// Config paths resolve against the directory holding the config file; paths
/// given on the command line resolve against the working directory.
pub(crate) fn load_project(
    config_path: Option<&Path>,
    sources: &SourceArgs,
    out: Option<&Path>,
) -> Result<ResolvedConfig, ConfigError> {
    let cwd = std::env::current_dir()?;

    let located = config_path.map(Path::to_path_buf).or_else(find_config);
    let (mut config, root) = match located {
        Some(path) => {
            tracing::debug!(config = %path.display(), "using config file");
            let config = load_config(Some(&path))?;
            let root = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (config, root)
        }
        None => {
            tracing::debug!("no tokenweave.toml found, using defaults");
            (default_config(), cwd.clone())
        }
    };

    let overrides = CliOverrides {
        out_dir: out.map(|p| cwd.join(p)),
        tokens: (!sources.tokens.is_empty()).then(|| {
            sources.tokens.iter().map(|t| cwd.join(t).to_string_lossy().into_owned()).collect()
        }),
    };
    merge_cli_overrides(&mut config, &overrides);

    ResolvedConfig::resolve(config, &root)
}
