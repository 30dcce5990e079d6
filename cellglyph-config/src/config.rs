//! Core `Config` struct, persistence and path resolution.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - `load_from` / `save_to` for explicit paths
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - Validation and builder helpers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::LogLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // --- Font Settings ---
    /// Path to the font file (TTF/OTF/TTC)
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Face index inside a font collection
    #[serde(default)]
    pub face_index: u32,

    /// Font size in points
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: f32,

    /// Horizontal resolution in dots per inch
    #[serde(default = "crate::defaults::dpi")]
    pub dpi_x: u32,

    /// Vertical resolution in dots per inch
    #[serde(default = "crate::defaults::dpi")]
    pub dpi_y: u32,

    /// Enable hinting
    /// Aligns outlines to the pixel grid for sharper small text
    #[serde(default = "crate::defaults::bool_true")]
    pub hinting: bool,

    /// Hint style: 0 = rasterizer default, 1-2 = light, 3+ = full
    #[serde(default = "crate::defaults::hintstyle")]
    pub hintstyle: i32,

    // --- Cell Settings ---
    /// Cell width in pixels; wider composited runs are trimmed to it
    #[serde(default)]
    pub cell_width: Option<usize>,

    /// Scaler cache entries kept per face
    #[serde(default = "crate::defaults::scale_cache_entries")]
    pub scale_cache_entries: usize,

    // --- Logging ---
    #[serde(default)]
    pub log_level: LogLevel,

    /// Write log lines to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            face_index: 0,
            font_size: crate::defaults::font_size(),
            dpi_x: crate::defaults::dpi(),
            dpi_y: crate::defaults::dpi(),
            hinting: crate::defaults::bool_true(),
            hintstyle: crate::defaults::hintstyle(),
            cell_width: None,
            scale_cache_entries: crate::defaults::scale_cache_entries(),
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path, creating it when missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Load and validate configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("cellglyph")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/cellglyph on all Unix-like platforms
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("cellglyph")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Reject values no face can be built from.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Validation(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.dpi_x == 0 || self.dpi_y == 0 {
            return Err(ConfigError::Validation(format!(
                "dpi must be positive, got {}x{}",
                self.dpi_x, self.dpi_y
            )));
        }
        if self.cell_width == Some(0) {
            return Err(ConfigError::Validation(
                "cell_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Font size in 1/64 pt.
    pub fn char_size_26_6(&self) -> i64 {
        (f64::from(self.font_size) * 64.0).round() as i64
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_hinting(mut self, hinting: bool, hintstyle: i32) -> Self {
        self.hinting = hinting;
        self.hintstyle = hintstyle;
        self
    }

    pub fn with_cell_width(mut self, cell_width: usize) -> Self {
        self.cell_width = Some(cell_width);
        self
    }
}
