//! Build runners and dev servers.
//!
//! Both flavors hold an immutable base config and a list of required override
//! keys. A call validates the override, merges it over the base and delegates
//! exactly once; a failed validation never reaches the bundler.

use std::fmt;
use std::sync::Arc;

use esrun_config::{BuildOptionKey, BuildOptions, combine_configs};
use tracing::debug;

use crate::bundler::{BuildOutcome, Bundler, ServeOptions, ServeOutcome};
use crate::error::{RunnerError, RunnerResult};

/// Required keys absent from `overrides`, in the order they were declared.
///
/// Presence is key existence: a key set to `false` or an empty list counts.
pub fn missing_overrides(
    required: &[BuildOptionKey],
    overrides: &BuildOptions,
) -> Vec<BuildOptionKey> {
    required
        .iter()
        .filter(|key| !overrides.has(key))
        .cloned()
        .collect()
}

#[derive(Clone)]
struct RunnerConfig {
    base: BuildOptions,
    required_overrides: Vec<BuildOptionKey>,
    bundler: Arc<dyn Bundler>,
}

impl RunnerConfig {
    fn new(bundler: Arc<dyn Bundler>, base: BuildOptions) -> Self {
        Self {
            base,
            required_overrides: Vec::new(),
            bundler,
        }
    }

    fn prepare(&self, overrides: &BuildOptions) -> RunnerResult<BuildOptions> {
        let missing = missing_overrides(&self.required_overrides, overrides);
        if !missing.is_empty() {
            return Err(RunnerError::MissingRequiredOverride { missing });
        }

        Ok(combine_configs(&self.base, overrides))
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("base", &self.base)
            .field("required_overrides", &self.required_overrides)
            .finish_non_exhaustive()
    }
}

/// Runs one-shot builds.
#[derive(Debug, Clone)]
pub struct BuildRunner {
    config: RunnerConfig,
}

impl BuildRunner {
    pub fn new(bundler: Arc<dyn Bundler>, base: BuildOptions) -> Self {
        Self {
            config: RunnerConfig::new(bundler, base),
        }
    }

    /// Keys every call to [`run`](Self::run) must supply.
    pub fn with_required_overrides(
        mut self,
        keys: impl IntoIterator<Item = BuildOptionKey>,
    ) -> Self {
        self.config.required_overrides = keys.into_iter().collect();
        self
    }

    pub fn base(&self) -> &BuildOptions {
        &self.config.base
    }

    pub fn required_overrides(&self) -> &[BuildOptionKey] {
        &self.config.required_overrides
    }

    /// Validate `overrides`, merge them over the base and build.
    ///
    /// # Errors
    ///
    /// [`RunnerError::MissingRequiredOverride`] when a required key is absent;
    /// otherwise whatever the bundler returns.
    pub async fn run(&self, overrides: BuildOptions) -> RunnerResult<BuildOutcome> {
        let options = self.config.prepare(&overrides)?;
        debug!(
            entries = options.entry_points.as_ref().map_or(0, Vec::len),
            plugins = options.plugins().len(),
            "delegating build"
        );
        Ok(self.config.bundler.build(options).await?)
    }

    /// Run with an empty override.
    pub async fn run_default(&self) -> RunnerResult<BuildOutcome> {
        self.run(BuildOptions::default()).await
    }
}

/// Starts the bundler's dev server on `localhost:6969`.
#[derive(Debug, Clone)]
pub struct DevServer {
    config: RunnerConfig,
}

impl DevServer {
    pub fn new(bundler: Arc<dyn Bundler>, base: BuildOptions) -> Self {
        Self {
            config: RunnerConfig::new(bundler, base),
        }
    }

    pub fn with_required_overrides(
        mut self,
        keys: impl IntoIterator<Item = BuildOptionKey>,
    ) -> Self {
        self.config.required_overrides = keys.into_iter().collect();
        self
    }

    pub fn base(&self) -> &BuildOptions {
        &self.config.base
    }

    pub fn required_overrides(&self) -> &[BuildOptionKey] {
        &self.config.required_overrides
    }

    /// The address is fixed; overrides only change the build options.
    pub fn listen_address(&self) -> ServeOptions {
        ServeOptions::default()
    }

    pub async fn run(&self, overrides: BuildOptions) -> RunnerResult<ServeOutcome> {
        let options = self.config.prepare(&overrides)?;
        let serve = self.listen_address();
        debug!(address = %serve, "delegating serve");
        Ok(self.config.bundler.serve(serve, options).await?)
    }

    pub async fn run_default(&self) -> RunnerResult<ServeOutcome> {
        self.run(BuildOptions::default()).await
    }
}
