//! `esrun serve`.

use esrun_runner::presets;
use tracing::info;

use crate::cli::{Preset, RunArgs};
use crate::commands::{backend, project_dir};
use crate::config::load_overrides;
use crate::error::Result;
use crate::ui;

/// Start the dev server and keep it running until Ctrl-C or until esbuild
/// exits on its own.
pub async fn execute(args: RunArgs) -> Result<()> {
    let cwd = project_dir(args.cwd.as_deref())?;
    let overrides = load_overrides(&args, &cwd)?;
    let (bundler, resolver) = backend(&cwd)?;

    let server = match args.preset {
        Preset::Electron => presets::electron_dev_server(bundler),
        Preset::Preact => presets::preact_dev_server(bundler, &resolver).await?,
    };
    info!(preset = ?args.preset, address = %server.listen_address(), "starting dev server");

    let outcome = server.run(overrides).await?;
    ui::success(&format!("Serving on {}", outcome.url()));
    ui::info("Press Ctrl-C to stop");

    let mut handle = outcome.handle;
    let exited = tokio::select! {
        result = handle.wait() => Some(result),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            None
        }
    };

    match exited {
        Some(result) => {
            result?;
            ui::info("Dev server exited");
        }
        None => {
            ui::info("Stopping dev server");
            handle.stop().await?;
        }
    }
    Ok(())
}
