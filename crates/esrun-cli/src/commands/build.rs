//! `esrun build`.

use std::time::Instant;

use esrun_runner::{presets, time_diff};
use tracing::info;

use crate::cli::{Preset, RunArgs};
use crate::commands::{backend, project_dir};
use crate::config::load_overrides;
use crate::error::Result;
use crate::ui;

/// Load overrides, build once with the chosen preset and report the result.
pub async fn execute(args: RunArgs) -> Result<()> {
    let start = Instant::now();

    let cwd = project_dir(args.cwd.as_deref())?;
    let overrides = load_overrides(&args, &cwd)?;
    let (bundler, resolver) = backend(&cwd)?;

    let runner = match args.preset {
        Preset::Electron => presets::electron_build_runner(bundler),
        Preset::Preact => presets::preact_build_runner(bundler, &resolver).await?,
    };
    info!(preset = ?args.preset, cwd = %cwd.display(), "building");

    let outcome = runner.run(overrides).await?;
    for warning in &outcome.warnings {
        ui::warning(warning);
    }

    ui::success(&format!("Build completed in {}ms", time_diff(start, None)));
    Ok(())
}
