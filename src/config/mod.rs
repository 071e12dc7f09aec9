//! Configuration loading and management

mod io;
mod services;
mod voice;

pub use io::write_template;
pub use services::{HttpSettings, LlmSettings, MarketSettings, WeatherSettings};
pub use voice::VoiceSettings;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Commented configuration written by `farmhand init`
pub const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Voice input settings
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Chat advisor (LLM) settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Weather and geolocation settings
    #[serde(default)]
    pub weather: WeatherSettings,

    /// Market price settings
    #[serde(default)]
    pub market: MarketSettings,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration for a working directory.
    ///
    /// Looks for `.farmhand/config.toml` in the directory, then the global
    /// `~/.farmhand/config.toml`, then falls back to defaults.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = dir.join(".farmhand/config.toml");
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        Ok(Self::default())
    }

    /// Load from an explicit path when given, otherwise from `dir`
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::from_dir(dir),
        }
    }
}
