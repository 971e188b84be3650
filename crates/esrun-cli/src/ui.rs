//! Status messages for terminal output. Everything goes to stderr so stdout
//! stays free for esbuild.

use owo_colors::OwoColorize;

pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}
