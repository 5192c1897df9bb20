//! Build result types.

use crate::plugin::{BuildArtifact, Contents};
use std::time::Duration;

/// An artifact together with the plugin that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginArtifact {
    pub plugin: String,
    pub artifact: BuildArtifact,
}

/// Aggregated result of a successful build.
#[derive(Debug, Default)]
pub struct BuildOutput {
    /// Artifacts in plugin registration order, then in each plugin's order
    pub artifacts: Vec<PluginArtifact>,
    /// Number of resolved tokens the plugins received
    pub token_count: usize,
    /// Total build duration
    pub total_duration: Duration,
}

impl BuildOutput {
    /// Create a new empty build output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one plugin's artifacts.
    pub fn add_plugin_results(&mut self, plugin: &str, artifacts: Vec<BuildArtifact>) {
        self.artifacts.extend(
            artifacts.into_iter().map(|artifact| PluginArtifact { plugin: plugin.to_string(), artifact }),
        );
    }

    /// Set the total duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.total_duration = duration;
        self
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Filenames in output order.
    pub fn filenames(&self) -> Vec<&str> {
        self.artifacts.iter().map(|a| a.artifact.filename.as_str()).collect()
    }

    /// Contents of the first artifact with this filename.
    pub fn get(&self, filename: &str) -> Option<&Contents> {
        self.artifacts
            .iter()
            .find(|a| a.artifact.filename == filename)
            .map(|a| &a.artifact.contents)
    }
}
