//! Build command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{load_project, SourceArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::build::BuildPipeline;
use crate::output::write_outputs;

/// Run the build command
pub fn run_build(
    config_path: Option<&Path>,
    sources: &SourceArgs,
    out: Option<&Path>,
    dry_run: bool,
    jobs: Option<usize>,
) -> ExitCode {
    if jobs == Some(0) {
        eprintln!("Error: --jobs must be at least 1");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let config = match load_project(config_path, sources, out) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let out_dir = config.out_dir.clone();

    let mut pipeline = match BuildPipeline::from_config(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if let Some(jobs) = jobs {
        pipeline = pipeline.with_jobs(jobs);
    }

    let output = match pipeline.run() {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Build failed: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if dry_run {
        println!("Dry run - would write to {}:", out_dir.display());
        for entry in &output.artifacts {
            println!(
                "  {} ({}, {} bytes)",
                entry.artifact.filename,
                entry.plugin,
                entry.artifact.contents.len()
            );
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    match write_outputs(&out_dir, &output) {
        Ok(paths) => {
            println!(
                "Built {} tokens into {} files in {:.2?}",
                output.token_count,
                paths.len(),
                output.total_duration
            );
            for path in &paths {
                println!("  {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
