// Error types for the page-object layer

use std::time::Duration;

use thiserror::Error;

use crate::locator::Locator;
use crate::wait::WaitCondition;

/// Result type alias for page-object operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a remote page.
///
/// Failure kinds are modeled as inspectable variants rather than an opaque
/// message so callers can branch on what went wrong without string matching.
#[derive(Debug, Error)]
pub enum Error {
    /// A wait condition never held within the allotted window.
    ///
    /// Carries the locator and condition that were being polled plus the
    /// time actually spent, so the failing step can be correlated with its
    /// diagnostic artifact.
    #[error("timed out after {elapsed:?} waiting for {condition} on {locator}")]
    Timeout {
        locator: Locator,
        condition: WaitCondition,
        elapsed: Duration,
    },

    /// Document never reached readyState "complete" within the timeout.
    #[error("navigation timeout after {elapsed:?} at '{url}'")]
    NavigationTimeout { url: String, elapsed: Duration },

    /// Observed page state violates an expected invariant.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    /// A required collection was empty when a non-empty result was required.
    #[error("required collection is empty: {what}")]
    EmptyCollection { what: &'static str },

    /// A runtime value was rejected before being embedded into a selector.
    #[error("filter value {value:?} rejected: {reason}")]
    InvalidFilterValue { value: String, reason: &'static str },

    /// Error reported by the remote session boundary.
    #[error("driver error: {0}")]
    Driver(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Expected-state violations observed on the remote page.
#[derive(Debug, Error)]
pub enum AssertionFailure {
    /// A page's required elements did not become visible.
    #[error("{page} page did not load: {detail}")]
    PageNotLoaded { page: &'static str, detail: String },

    /// A job entry's field text does not contain the expected substring.
    #[error("job {job_index}: {field} was {actual:?}, expected to contain {expected:?}")]
    JobFieldMismatch {
        job_index: usize,
        field: &'static str,
        actual: String,
        expected: String,
    },

    /// The current URL is not on the expected third-party domain.
    #[error("current url {actual_url:?} does not contain {expected_fragment:?}")]
    UnexpectedDomain {
        actual_url: String,
        expected_fragment: String,
    },
}

impl Error {
    /// Returns true for timeout-class failures (element or navigation).
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. } | Error::NavigationTimeout { .. })
    }
}
