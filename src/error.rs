//! # Error Types
//!
//! Custom error types for the scroll wheel core using `thiserror`.

use thiserror::Error;

/// Main error type for the scroll wheel core
#[derive(Debug, Error)]
pub enum ScrollWheelError {
    /// Rotary sensor errors (probe failure at startup is fatal)
    #[error("sensor error: {0}")]
    Sensor(String),

    /// Transport (wireless link) errors
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the scroll wheel core
pub type Result<T> = std::result::Result<T, ScrollWheelError>;
