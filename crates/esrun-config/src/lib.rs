//! Typed configuration for esrun build runners.
//!
//! [`BuildOptions`] mirrors the option object accepted by esbuild's `build`
//! and `serve` entry points. Every field is optional so that an override
//! record can express exactly which keys a caller supplied, and
//! [`combine_configs`] layers an override over a base record.

pub mod error;
pub mod merge;
pub mod options;
pub mod plugin;

pub use error::{ConfigError, Result};
pub use merge::combine_configs;
pub use options::{
    BuildOptionKey, BuildOptions, Format, LogLevel, Metafile, Platform, SourceMap, SourceMapMode,
};
pub use plugin::PluginDescriptor;
