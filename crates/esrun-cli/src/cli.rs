//! Command-line interface definition.
//!
//! - `esrun build` - one-shot build through a preset
//! - `esrun serve` - esbuild dev server on localhost:6969 through a preset

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// esrun - esbuild with Electron and Preact presets
#[derive(Parser, Debug)]
#[command(
    name = "esrun",
    version,
    about = "Run esbuild with opinionated Electron and Preact presets"
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build once with the selected preset
    Build(RunArgs),

    /// Start esbuild's dev server on localhost:6969
    ///
    /// Runs until interrupted with Ctrl-C.
    Serve(RunArgs),
}

/// Preset base configuration
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Preset {
    /// Electron main/preload scripts (entry points required)
    Electron,
    /// Preact app with React compatibility aliases
    Preact,
}

/// Arguments shared by `build` and `serve`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Preset providing the base configuration
    #[arg(short, long, value_enum)]
    pub preset: Preset,

    /// Entry points; sets `entryPoints` in the override
    #[arg(value_name = "ENTRY")]
    pub entry: Vec<String>,

    /// Output directory; sets `outdir` in the override
    #[arg(short = 'd', long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Minify output
    #[arg(short, long, conflicts_with = "no_minify")]
    pub minify: bool,

    /// Disable minification even if the preset enables it
    #[arg(long)]
    pub no_minify: bool,

    /// Emit linked source maps
    #[arg(short, long)]
    pub sourcemap: bool,

    /// JSON file with override options (default: esrun.config.json if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}
