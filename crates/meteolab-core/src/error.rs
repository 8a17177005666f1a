//! Error type shared by the configuration and export paths.
//!
//! Generating history and perturbing readings never fails; only the ambient
//! plumbing around them (reading config files, writing snapshots) does.

use thiserror::Error;

/// Errors surfaced by `meteolab-core`.
#[derive(Debug, Error)]
pub enum MeteoError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file or snapshot could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MeteoError>;
