// Error types for the pet-store client

use thiserror::Error;

/// Result type alias for pet-store client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the pet-store API.
///
/// Note that non-2xx responses are not errors here: the test suite asserts
/// on status codes, so every completed exchange surfaces as an
/// [`crate::ApiResponse`].
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection, TLS, timeout)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON the caller asked for
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
