//! Configuration system for cellglyph.
//!
//! This crate provides configuration loading, saving, and default values
//! for glyph rendering:
//!
//! - Font file, face index and size
//! - Hinting switch and hint style
//! - Target cell width for trimming
//! - Log level and optional log file

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
