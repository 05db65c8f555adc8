//! Core error types for studydash-core.
//!
//! Nothing in the core is fatal: validation failures leave collections
//! untouched and audio failures are logged and swallowed by the alert sink.
//! The hierarchy still uses thiserror so hosts get readable messages.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studydash-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Audio playback errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not resolve or create the data directory
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
///
/// Returned by add operations whose input is rejected. The target
/// collection is never modified when one of these is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty (or whitespace-only) text
    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },

    /// Time-of-day not in HH:MM form
    #[error("Invalid time '{0}': expected HH:MM (24h)")]
    InvalidTime(String),

    /// Month outside 1..=12 or year chrono cannot represent
    #[error("Invalid calendar month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Audio playback errors reported by an [`AudioCue`](crate::alert::AudioCue).
#[derive(Error, Debug)]
pub enum AudioError {
    /// Playback was refused by the platform or the output device
    #[error("Playback blocked: {0}")]
    Blocked(String),

    /// The output device failed mid-operation
    #[error("Audio device error: {0}")]
    Device(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
