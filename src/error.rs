//! Error types for the telemetry monitor

use std::io;
use thiserror::Error;

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Main error type for the telemetry monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Sensor source error
    #[error("Sensor error: {0}")]
    Sensor(String),

    /// Unsupported platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/display error
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}
