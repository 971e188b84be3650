//! Error types for option parsing and conversion.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("option name cannot be empty")]
    EmptyOptionName,

    #[error("invalid config value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue {
        field: String,
        hint: Option<String>,
    },
}
