//! Writing build artifacts to disk

use crate::build::BuildOutput;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Check that an artifact filename stays inside the output directory.
fn artifact_path(out_dir: &Path, filename: &str) -> io::Result<PathBuf> {
    let relative = Path::new(filename);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if filename.is_empty() || escapes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("artifact path '{}' must be relative to the output directory", filename),
        ));
    }
    Ok(out_dir.join(relative))
}

/// Write every artifact under `out_dir`, creating directories as needed.
///
/// All paths are checked before anything is written. Returns the written
/// paths in output order.
pub fn write_outputs(out_dir: &Path, output: &BuildOutput) -> io::Result<Vec<PathBuf>> {
    let paths = output
        .artifacts
        .iter()
        .map(|a| artifact_path(out_dir, &a.artifact.filename))
        .collect::<io::Result<Vec<_>>>()?;

    for (path, entry) in paths.iter().zip(&output.artifacts) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, entry.artifact.contents.as_bytes())?;
        tracing::debug!(path = %path.display(), plugin = %entry.plugin, "wrote artifact");
    }

    Ok(paths)
}
