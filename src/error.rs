//! Error types for Filmdesk
//!
//! This module defines all error types used throughout the service,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Filmdesk operations
///
/// This enum encompasses all possible errors that can occur while loading
/// configuration, mutating the catalog, or delivering messages through a
/// transport adapter. Per-user input mistakes (bad numbers, unknown names)
/// are never errors: the dialogue engine answers them with a re-prompt or a
/// not-found message instead.
#[derive(Error, Debug)]
pub enum FilmdeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog store errors (seed loading, invariant violations)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Rating rejected by the catalog store bound
    #[error("Rating out of range: {value} (expected 0 to 10)")]
    InvalidRating {
        /// The rejected rating value
        value: f64,
    },

    /// Transport/delivery errors (console output, message log)
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Filmdesk operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
