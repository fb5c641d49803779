//! Error types for the Live2D host

use thiserror::Error;

/// Main error type for the host
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request completed with a non-OK status
    #[error("fetch failed: {0}")]
    Status(reqwest::StatusCode),

    /// Transport failure or response-body decode failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model name missing from the model dictionary
    #[error("model '{0}' not found in dictionary")]
    ModelNotFound(String),
}
