//! Crate error type for presets, settings and list editing.
//!
//! The file-facing library layer uses `anyhow` with context instead; see
//! `library::loader` and `metadata::extractor`.

use thiserror::Error;

/// Result type for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preset or settings JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested preset or file not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid caller input (empty preset name, full sort list, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or logging setup error
    #[error("Configuration error: {0}")]
    Config(String),
}
