//! The immutable configuration handed to plugins

use super::loader::{resolve_path, ConfigError};
use super::schema::{PluginSpec, TokenweaveConfig};
use std::path::{Path, PathBuf};

/// Process-wide configuration, fixed before the pipeline starts.
///
/// All paths are resolved against the project root. Plugins receive it by
/// shared reference in their configure phase and copy out what they need.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Directory containing tokenweave.toml (or the working directory)
    pub root: PathBuf,
    /// Output directory for build artifacts
    pub out_dir: PathBuf,
    /// Token source files, in merge order
    pub tokens: Vec<PathBuf>,
    /// Plugins, in registration order
    pub plugins: Vec<PluginSpec>,
}

impl ResolvedConfig {
    /// Resolve paths and expand token globs.
    ///
    /// A plain path is kept even if it does not exist yet (reading it reports
    /// the error); a glob pattern must match at least one file. Matches of
    /// one pattern are sorted, patterns keep their listed order, and a file
    /// matched twice is only loaded once.
    pub fn resolve(config: TokenweaveConfig, root: &Path) -> Result<Self, ConfigError> {
        let mut tokens: Vec<PathBuf> = Vec::new();
        for pattern in &config.tokens {
            for path in expand_pattern(root, pattern)? {
                if !tokens.contains(&path) {
                    tokens.push(path);
                }
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            out_dir: resolve_path(root, &config.out_dir),
            tokens,
            plugins: config.plugins,
        })
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn expand_pattern(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let full = resolve_path(root, Path::new(pattern.trim()));
    if !is_glob(pattern) {
        return Ok(vec![full]);
    }

    let full_str = full.to_string_lossy();
    let paths = glob::glob(&full_str).map_err(|e| ConfigError::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut matches: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
    if matches.is_empty() {
        return Err(ConfigError::NoMatches(pattern.to_string()));
    }
    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_paths_against_root() {
        let temp = TempDir::new().unwrap();
        let config = TokenweaveConfig {
            tokens: vec!["tokens.json".into()],
            out_dir: PathBuf::from("dist"),
            plugins: vec![PluginSpec::new("sass")],
        };
        let resolved = ResolvedConfig::resolve(config, temp.path()).unwrap();
        assert_eq!(resolved.tokens, vec![temp.path().join("tokens.json")]);
        assert_eq!(resolved.out_dir, temp.path().join("dist"));
        assert_eq!(resolved.plugins[0].name, "sass");
    }

    #[test]
    fn test_glob_expansion_sorted_and_deduplicated() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tokens");
        fs::create_dir_all(&dir).unwrap();
        for name in ["b.json", "a.json", "base.json"] {
            fs::write(dir.join(name), "{}").unwrap();
        }

        let config = TokenweaveConfig {
            tokens: vec!["tokens/base.json".into(), "tokens/*.json".into()],
            ..TokenweaveConfig::default()
        };
        let resolved = ResolvedConfig::resolve(config, temp.path()).unwrap();
        assert_eq!(
            resolved.tokens,
            vec![dir.join("base.json"), dir.join("a.json"), dir.join("b.json")]
        );
    }

    #[test]
    fn test_glob_without_matches() {
        let temp = TempDir::new().unwrap();
        let config =
            TokenweaveConfig { tokens: vec!["missing/*.json".into()], ..TokenweaveConfig::default() };
        let err = ResolvedConfig::resolve(config, temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoMatches(ref p) if p == "missing/*.json"));
    }
}
