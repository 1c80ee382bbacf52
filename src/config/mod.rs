//! Configuration management for Cosmo

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Speech narration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Narrate lesson steps and results
    pub enabled: bool,

    /// Speech program to run; detected from PATH when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Speaking rate multiplier
    pub rate: f32,

    /// Pitch multiplier
    pub pitch: f32,

    /// Volume multiplier
    pub volume: f32,

    /// Delay between entering the lesson and narrating its first step
    pub start_delay_ms: u64,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: None,
            rate: 0.9,
            pitch: 1.2,
            volume: 0.8,
            start_delay_ms: 500,
        }
    }
}

impl NarrationConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// Camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offer the camera on the welcome screen
    pub enabled: bool,

    /// Video device to open
    pub device: PathBuf,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { enabled: true, device: PathBuf::from("/dev/video0") }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Narration settings
    pub narration: NarrationConfig,

    /// Camera settings
    pub camera: CameraConfig,

    /// Share of questions that must be answered correctly to earn the badge
    pub passing_ratio: f64,

    /// Custom curriculum file; the built-in satellite lesson when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curriculum: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Deep Space".to_string(),
            custom_theme: None,
            narration: NarrationConfig::default(),
            camera: CameraConfig::default(),
            passing_ratio: 0.75,
            curriculum: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "cosmo").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "cosmo").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the log file path
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("cosmo.log"))
    }

    /// Get the active theme: custom overrides first, then the named theme
    pub fn active_theme(&self) -> Theme {
        if let Some(theme) = &self.custom_theme {
            return theme.clone();
        }
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme, using default");
            Theme::default()
        })
    }
}
