//! Tokenweave - command-line tool for building design tokens

use std::process::ExitCode;

use clap::Parser;
use tokenweave::cli::{self, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --verbose wins over TOKENWEAVE_LOG
    let filter = if cli.verbose {
        EnvFilter::new("tokenweave=debug")
    } else {
        EnvFilter::try_from_env("TOKENWEAVE_LOG").unwrap_or_else(|_| "tokenweave=warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli::run_with(cli)
}
