//! Error types for the scentrules-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the scentrules library.
///
/// Only fatal conditions are errors. Skipped blocks, ambiguous
/// classifications and a missing override file are reported through
/// `tracing` and [`ParseOutcome::warnings`](crate::ParseOutcome) instead.
#[derive(Error, Debug)]
pub enum RulebookError {
    /// A required input file does not exist.
    #[error("input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the scentrules library.
pub type Result<T> = std::result::Result<T, RulebookError>;
