//! Error types for linkstash.

use thiserror::Error;

/// Result type alias using linkstash's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for linkstash operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bookmark not found
    #[error("Link not found: {0}")]
    LinkNotFound(uuid::Uuid),

    /// Link preview fetch/parse failed. Carries the offending URL so the
    /// message is actionable at the API boundary.
    #[error("Failed to fetch preview for {url}: {reason}")]
    Preview { url: String, reason: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a preview error for the given URL and underlying cause.
    pub fn preview(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Preview {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
