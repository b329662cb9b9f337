//! Configuration system for the lyric-atlas font generator.
//!
//! This crate provides configuration loading, saving, validation and default
//! values for atlas generation. It includes:
//!
//! - Font selection (family, weight, default and CJK sizes)
//! - Glyph layout knobs (row height, horizontal margin, spacing adjustment)
//! - Drop shadow and external compressor settings
//! - Output format and logging level

pub mod config;
pub mod defaults;
mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{CompressorConfig, DefinitionFormat, DropShadowConfig, FontWeightName, LogLevel};
