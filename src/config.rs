//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application preferences
//! in TOML format with platform-specific directory resolution. Preferences
//! seed new layouts and tune export; they never override what a loaded
//! configuration document says.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{APP_NAME, CONFIG_DIR_ENV, DEFAULT_DATE_FORMAT};
use crate::models::{CleaningOptions, ZoomLimits};
use crate::parser::codec::{ExportOptions, KeyCollisionPolicy};

/// Cleaning defaults applied to a fresh layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Date pattern for new layouts (e.g., "%d/%m/%Y")
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Transaction-detail placement for new layouts
    #[serde(default)]
    pub trans_detail: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            trans_detail: String::new(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// What to do when two column names produce the same key
    #[serde(default)]
    pub key_collisions: KeyCollisionPolicy,
}

/// Page viewer preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Smallest zoom factor
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    /// Largest zoom factor
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    /// Zoom in/out increment
    #[serde(default = "default_scale_step")]
    pub scale_step: f64,
}

fn default_min_scale() -> f64 {
    0.5
}

fn default_max_scale() -> f64 {
    1.5
}

fn default_scale_step() -> f64 {
    0.1
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            scale_step: default_scale_step(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/TableCrop/config.toml`
/// - macOS: `~/Library/Application Support/TableCrop/config.toml`
/// - Windows: `%APPDATA%\TableCrop\config.toml`
///
/// # Validation
///
/// - `min_scale`, `max_scale` and `scale_step` must be positive
/// - `min_scale` must not exceed `max_scale`
/// - `date_format` must not be empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Defaults for new layouts
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
    /// Viewer preferences
    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// `TABLECROP_CONFIG_DIR` overrides the platform location.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let viewer = &self.viewer;
        for (name, value) in [
            ("min_scale", viewer.min_scale),
            ("max_scale", viewer.max_scale),
            ("scale_step", viewer.scale_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("{name} must be a positive finite number, got {value}");
            }
        }
        if viewer.min_scale > viewer.max_scale {
            anyhow::bail!(
                "min_scale ({}) must not exceed max_scale ({})",
                viewer.min_scale,
                viewer.max_scale
            );
        }
        if self.defaults.date_format.trim().is_empty() {
            anyhow::bail!("Default date_format must not be empty");
        }

        Ok(())
    }

    /// Cleaning options for a layout created from scratch.
    #[must_use]
    pub fn cleaning_defaults(&self) -> CleaningOptions {
        CleaningOptions {
            date_format: self.defaults.date_format.clone(),
            trans_detail: self.defaults.trans_detail.clone(),
            ..CleaningOptions::default()
        }
    }

    /// Export settings for the codec.
    #[must_use]
    pub const fn export_options(&self) -> ExportOptions {
        ExportOptions {
            key_collisions: self.export.key_collisions,
        }
    }

    /// Zoom limits for the viewer.
    #[must_use]
    pub const fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.viewer.min_scale,
            max: self.viewer.max_scale,
            step: self.viewer.scale_step,
        }
    }
}
