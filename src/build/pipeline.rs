//! Build pipeline orchestration.
//!
//! The pipeline loads and resolves the token sources once, runs every
//! plugin's configure step in registration order, then runs the build steps
//! concurrently on a worker pool. Results are joined in registration order
//! whatever order the workers finish in.

use super::{BuildError, BuildOutput};
use crate::config::ResolvedConfig;
use crate::document::{load_documents, resolve_document};
use crate::models::ResolvedTokens;
use crate::plugin::{BuildArtifact, BuildInput, Plugin, PluginError, PluginPhase};
use crate::plugins;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Default number of parallel jobs (uses available parallelism).
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Build pipeline for one configuration and an ordered plugin list.
pub struct BuildPipeline {
    config: Arc<ResolvedConfig>,
    plugins: Vec<Box<dyn Plugin>>,
    jobs: usize,
}

impl BuildPipeline {
    /// Create a pipeline with no plugins registered.
    pub fn new(config: ResolvedConfig) -> Self {
        Self { config: Arc::new(config), plugins: Vec::new(), jobs: default_jobs() }
    }

    /// Create a pipeline with the plugins named in the config.
    pub fn from_config(config: ResolvedConfig) -> Result<Self, BuildError> {
        let plugins = config
            .plugins
            .iter()
            .map(plugins::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        let mut pipeline = Self::new(config);
        pipeline.plugins = plugins;
        Ok(pipeline)
    }

    /// Register a plugin after the ones already registered.
    pub fn with_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Set the number of parallel build jobs.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Load the configured sources, resolve them and run every plugin.
    pub fn run(self) -> Result<BuildOutput, BuildError> {
        let start = Instant::now();
        tracing::info!(sources = self.config.tokens.len(), "loading token sources");
        let document = load_documents(&self.config.tokens)?;
        let tokens = resolve_document(&document)?;
        let output = self.run_tokens(&tokens)?;
        Ok(output.with_duration(start.elapsed()))
    }

    /// Run every plugin over already-resolved tokens.
    ///
    /// Fails with the first error in registration order. No output is
    /// produced on failure.
    pub fn run_tokens(mut self, tokens: &ResolvedTokens) -> Result<BuildOutput, BuildError> {
        let start = Instant::now();
        if self.plugins.is_empty() {
            tracing::warn!("no plugins configured, nothing will be generated");
        }
        if tokens.is_empty() {
            tracing::warn!("token document contains no tokens");
        }

        for plugin in self.plugins.iter_mut() {
            let name = plugin.name().to_string();
            tracing::debug!(plugin = %name, "configuring plugin");
            plugin
                .config(&self.config)
                .map_err(|e| PluginError::new(&name, PluginPhase::Config, e))?;
        }

        let input = BuildInput { tokens: &tokens.tokens, metadata: &tokens.metadata };
        let results = self.build_all(&input);

        let mut output = BuildOutput::new();
        output.token_count = tokens.len();
        for (plugin, result) in self.plugins.iter().zip(results) {
            let artifacts = result?;
            tracing::debug!(plugin = plugin.name(), artifacts = artifacts.len(), "plugin finished");
            output.add_plugin_results(plugin.name(), artifacts);
        }

        tracing::info!(
            plugins = self.plugins.len(),
            artifacts = output.len(),
            tokens = output.token_count,
            "build complete"
        );
        Ok(output.with_duration(start.elapsed()))
    }

    /// Run all build steps, one result per plugin in registration order.
    fn build_all(&self, input: &BuildInput<'_>) -> Vec<Result<Vec<BuildArtifact>, PluginError>> {
        if self.jobs <= 1 || self.plugins.len() <= 1 {
            return self.plugins.iter().map(|p| build_one(p.as_ref(), input)).collect();
        }

        match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
            Ok(pool) => pool.install(|| {
                self.plugins.par_iter().map(|p| build_one(p.as_ref(), input)).collect()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "failed to start worker pool, building sequentially");
                self.plugins.iter().map(|p| build_one(p.as_ref(), input)).collect()
            }
        }
    }
}

fn build_one(
    plugin: &dyn Plugin,
    input: &BuildInput<'_>,
) -> Result<Vec<BuildArtifact>, PluginError> {
    tracing::debug!(plugin = plugin.name(), "building plugin");
    plugin
        .build(input)
        .map_err(|e| PluginError::new(plugin.name(), PluginPhase::Build, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metadata;
    use crate::plugin::PluginFailure;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            root: "/project".into(),
            out_dir: "/project/out".into(),
            tokens: vec![],
            plugins: vec![],
        }
    }

    fn empty_tokens() -> ResolvedTokens {
        ResolvedTokens { metadata: Metadata::default(), tokens: vec![] }
    }

    struct Fixed(&'static str);

    impl Plugin for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn build(&self, _input: &BuildInput<'_>) -> Result<Vec<BuildArtifact>, PluginFailure> {
            Ok(vec![BuildArtifact::text(format!("{}.txt", self.0), self.0)])
        }
    }

    struct Failing(&'static str, PluginPhase);

    impl Plugin for Failing {
        fn name(&self) -> &str {
            self.0
        }

        fn config(&mut self, _config: &ResolvedConfig) -> Result<(), PluginFailure> {
            match self.1 {
                PluginPhase::Config => Err("bad config".into()),
                PluginPhase::Build => Ok(()),
            }
        }

        fn build(&self, _input: &BuildInput<'_>) -> Result<Vec<BuildArtifact>, PluginFailure> {
            Err("bad build".into())
        }
    }

    struct CountingConfig(Arc<AtomicUsize>);

    impl Plugin for CountingConfig {
        fn name(&self) -> &str {
            "counting"
        }

        fn config(&mut self, config: &ResolvedConfig) -> Result<(), PluginFailure> {
            assert_eq!(config.root, std::path::PathBuf::from("/project"));
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn build(&self, _input: &BuildInput<'_>) -> Result<Vec<BuildArtifact>, PluginFailure> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_artifacts_in_registration_order() {
        let output = BuildPipeline::new(config())
            .with_plugin(Box::new(Fixed("one")))
            .with_plugin(Box::new(Fixed("two")))
            .with_plugin(Box::new(Fixed("three")))
            .with_jobs(3)
            .run_tokens(&empty_tokens())
            .unwrap();
        assert_eq!(output.filenames(), vec!["one.txt", "two.txt", "three.txt"]);
    }

    #[test]
    fn test_config_runs_once_per_plugin() {
        let count = Arc::new(AtomicUsize::new(0));
        BuildPipeline::new(config())
            .with_plugin(Box::new(CountingConfig(Arc::clone(&count))))
            .with_plugin(Box::new(CountingConfig(Arc::clone(&count))))
            .run_tokens(&empty_tokens())
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_config_failure_names_plugin() {
        let err = BuildPipeline::new(config())
            .with_plugin(Box::new(Fixed("ok")))
            .with_plugin(Box::new(Failing("broken", PluginPhase::Config)))
            .run_tokens(&empty_tokens())
            .unwrap_err();
        match err {
            BuildError::Plugin(e) => {
                assert_eq!(e.plugin, "broken");
                assert_eq!(e.phase, PluginPhase::Config);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_first_build_failure_in_registration_order_wins() {
        let err = BuildPipeline::new(config())
            .with_plugin(Box::new(Fixed("ok")))
            .with_plugin(Box::new(Failing("first", PluginPhase::Build)))
            .with_plugin(Box::new(Failing("second", PluginPhase::Build)))
            .with_jobs(4)
            .run_tokens(&empty_tokens())
            .unwrap_err();
        match err {
            BuildError::Plugin(e) => {
                assert_eq!(e.plugin, "first");
                assert_eq!(e.phase, PluginPhase::Build);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_plugins_is_empty_output() {
        let output = BuildPipeline::new(config()).run_tokens(&empty_tokens()).unwrap();
        assert!(output.is_empty());
        assert_eq!(output.token_count, 0);
    }

    #[test]
    fn test_jobs_clamped_to_one() {
        assert_eq!(BuildPipeline::new(config()).with_jobs(0).jobs(), 1);
    }
}
