//! Error types for classifier calls.

use thiserror::Error;

/// Errors from a single model-classification call.
///
/// None of these escape the router: a failed call is a degraded signal and
/// routing falls back to the deterministic and memory rankings.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Call exceeded its deadline.
    #[error("Classifier timeout after {0}ms")]
    Timeout(u64),

    /// Provider returned an error response (4xx, 5xx).
    #[error("Provider error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response text could not be turned into a decision.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Classifier configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClassifierError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierError::Network(_) => "network",
            ClassifierError::Timeout(_) => "timeout",
            ClassifierError::Upstream { .. } => "upstream",
            ClassifierError::InvalidResponse(_) => "invalid_response",
            ClassifierError::Configuration(_) => "configuration",
        }
    }

    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            ClassifierError::Timeout(timeout_ms)
        } else {
            ClassifierError::Network(e.to_string())
        }
    }
}
