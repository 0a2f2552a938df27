//! Error types for the bannergrab-core library.
//!
//! Probe failures are not errors: they are reported as
//! [`ProbeResult::Failure`](crate::domain::ProbeResult). This type covers the
//! surfaces around the probe (configuration and target parsing).

use thiserror::Error;

/// Result type alias for bannergrab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside of a probe attempt.
#[derive(Error, Debug)]
pub enum Error {
    /// A target string could not be parsed.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
