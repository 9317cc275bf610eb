//! Configuration management for the telemetry monitor
//!
//! This module provides configuration persistence for poll cadence, display
//! options, and the recording policy.

use crate::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Telemetry monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General display options
    pub general: GeneralConfig,
    /// Session recording options
    pub recording: RecordingConfig,
}

/// General display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Poll interval in milliseconds
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
    /// Text shown for a sensor that currently reports no value
    #[serde(default = "default_missing_placeholder")]
    pub missing_placeholder: String,
}

/// Session recording configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Directory recording files are written to
    #[serde(default = "default_recordings_directory")]
    pub directory: String,
    /// Fraction of available memory the buffer footprint may reach before an
    /// automatic flush
    #[serde(default = "default_pressure_fraction")]
    pub pressure_fraction: f64,
    /// Record 0.0 for sensors that currently report no value instead of
    /// skipping them
    #[serde(default)]
    pub record_missing_as_zero: bool,
}

// Default value functions
fn default_update_interval() -> u64 {
    500 // 500ms poll cadence
}

fn default_missing_placeholder() -> String {
    "NULL".to_string()
}

fn default_recordings_directory() -> String {
    "Recordings".to_string()
}

fn default_pressure_fraction() -> f64 {
    0.05 // 5% of available memory
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            recording: RecordingConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval(),
            missing_placeholder: default_missing_placeholder(),
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            directory: default_recordings_directory(),
            pressure_fraction: default_pressure_fraction(),
            record_missing_as_zero: false,
        }
    }
}

impl Config {
    /// Get the default configuration directory
    ///
    /// Returns `~/.config/telmon` on Unix-like systems, or
    /// `%APPDATA%\telmon` on Windows.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(windows) {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        };

        Ok(config_dir.join("telmon"))
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_dir = Self::default_path()?;
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| MonitorError::Parse(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::default_path()?;
        std::fs::create_dir_all(&config_dir)?;

        self.save_to(&config_dir.join("config.toml"))
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| MonitorError::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.update_interval_ms, 500);
        assert_eq!(config.general.missing_placeholder, "NULL");
        assert_eq!(config.recording.directory, "Recordings");
        assert_eq!(config.recording.pressure_fraction, 0.05);
        assert!(!config.recording.record_missing_as_zero);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.general.update_interval_ms,
            deserialized.general.update_interval_ms
        );
        assert_eq!(config.recording.directory, deserialized.recording.directory);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            "[general]\nupdate_interval_ms = 1000\n\n[recording]\ndirectory = \"Captures\"\n",
        )
        .unwrap();
        assert_eq!(config.general.update_interval_ms, 1000);
        assert_eq!(config.general.missing_placeholder, "NULL");
        assert_eq!(config.recording.directory, "Captures");
        assert_eq!(config.recording.pressure_fraction, 0.05);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.recording.record_missing_as_zero = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.recording.record_missing_as_zero);
    }
}
