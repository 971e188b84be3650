//! Shared test helpers for runner integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use esrun_config::BuildOptions;
use esrun_runner::{
    BuildOutcome, Bundler, BundlerResult, ServeOptions, ServeOutcome, ServerHandle,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// A call received by [`RecordingBundler`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Build(BuildOptions),
    Serve(ServeOptions, BuildOptions),
}

/// Bundler that records every call and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingBundler {
    calls: Mutex<Vec<Call>>,
}

impl RecordingBundler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn only_build(&self) -> BuildOptions {
        match self.calls().as_slice() {
            [Call::Build(options)] => options.clone(),
            other => panic!("expected exactly one build call, got {other:?}"),
        }
    }
}

#[async_trait]
impl Bundler for RecordingBundler {
    async fn build(&self, options: BuildOptions) -> BundlerResult<BuildOutcome> {
        self.calls.lock().push(Call::Build(options));
        Ok(BuildOutcome {
            warnings: vec!["recorded".to_string()],
            ..Default::default()
        })
    }

    async fn serve(
        &self,
        serve: ServeOptions,
        options: BuildOptions,
    ) -> BundlerResult<ServeOutcome> {
        self.calls.lock().push(Call::Serve(serve.clone(), options));
        Ok(ServeOutcome {
            host: serve.host,
            port: serve.port,
            handle: ServerHandle::detached(),
        })
    }
}
