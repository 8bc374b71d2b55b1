// Error types for the load harness

use thiserror::Error;

/// Result type alias for load-harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or running a load plan.
///
/// Individual request failures are not errors; they are recorded as metrics
/// and the run continues.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client could not be built or configured
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Report could not be serialized or written
    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}
