//! Logging setup for the esrun CLI.
//!
//! The level is chosen in this order:
//! 1. `--verbose`: DEBUG for esrun crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`: custom filter
//! 4. INFO for esrun crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "esrun_cli=debug,esrun_runner=debug,esrun_config=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "esrun_cli=info,esrun_runner=info,esrun_config=info";

/// Pick the filter for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// `NO_COLOR` disables, `FORCE_COLOR` enables, otherwise ask the terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
