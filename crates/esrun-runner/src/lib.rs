//! Build runners for esbuild with opinionated presets.
//!
//! A runner binds a base [`BuildOptions`] and a list of option keys every
//! caller must supply. Running it checks the override for those keys, merges
//! it over the base with [`combine_configs`](esrun_config::combine_configs)
//! and hands the result to a [`Bundler`]. Nothing is compiled here; the
//! bundler does all of the actual work.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use esrun_config::BuildOptions;
//! use esrun_runner::{EsbuildCli, presets};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let bundler = Arc::new(EsbuildCli::discover(".")?);
//! let runner = presets::electron_build_runner(bundler);
//!
//! let outcome = runner
//!     .run(BuildOptions::default().with_entry_points(["src/main.ts", "src/preload.ts"]))
//!     .await?;
//! println!("{} warnings", outcome.warnings.len());
//! # Ok(())
//! # }
//! ```

pub mod bundler;
pub mod error;
pub mod esbuild;
pub mod presets;
pub mod resolve;
pub mod runner;
pub mod time;

pub use bundler::{
    BuildOutcome, Bundler, DEV_SERVER_HOST, DEV_SERVER_PORT, ServeOptions, ServeOutcome,
    ServerHandle,
};
pub use error::{
    BundlerError, BundlerResult, PresetError, ResolveError, RunnerError, RunnerResult,
};
pub use esbuild::EsbuildCli;
pub use resolve::ModuleResolver;
pub use runner::{BuildRunner, DevServer, missing_overrides};
pub use time::{time_diff, time_diff_between};

pub use esrun_config::{BuildOptionKey, BuildOptions, PluginDescriptor};
