// src/error.rs
// Standardized error types for gitmuse

use thiserror::Error;

/// Main error type for the gitmuse library
#[derive(Error, Debug)]
pub enum MuseError {
    /// The generation backend failed or returned an unusable result.
    /// Fatal to the confirmation loop; never retried automatically.
    #[error("generation failed: {0}")]
    Generation(String),

    /// The interactive surface returned something outside the recognized
    /// answer set. Interrupts are not errors; they map to a cancelled outcome.
    #[error("prompt error: {0}")]
    Prompt(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("git error: {0}")]
    Git(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Convenience type alias for Result using MuseError
pub type Result<T> = std::result::Result<T, MuseError>;
