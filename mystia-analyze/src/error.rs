//! Error types for mystia-analyze
//!
//! Three fatal categories:
//! - **Input**: the post file cannot be read or decoded
//! - **Configuration**: parameters that cannot produce a meaningful result
//!   (e.g. more clusters than distinct data points)
//! - **Chart**: the rendering backend failed to write an image
//!
//! Data-quality findings are not errors; see `types::DataQualityWarning`.

use thiserror::Error;

/// Analysis error type
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Missing, unreadable or malformed input
    #[error("Input error: {0}")]
    Input(String),

    /// Parameters that cannot be satisfied by the data
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Chart rendering failed
    #[error("Chart rendering error: {0}")]
    Chart(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error (report export)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// mystia-common error
    #[error("Common error: {0}")]
    Common(#[from] mystia_common::Error),
}

impl AnalysisError {
    /// Wrap any plotters drawing error
    pub fn chart(err: impl std::fmt::Display) -> Self {
        AnalysisError::Chart(err.to_string())
    }
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
