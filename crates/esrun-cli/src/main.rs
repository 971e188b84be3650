//! esrun CLI entry point: argument parsing, logging setup and dispatch.

use clap::Parser;
use esrun_cli::{cli, commands, error, logger};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Build(run_args) => commands::build_execute(run_args).await,
        cli::Command::Serve(run_args) => commands::serve_execute(run_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
