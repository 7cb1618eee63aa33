//! Provider failure types.
//!
//! Every variant is a routine failure: the chain logs it, records it in the
//! attempt list and moves on to the next provider.

use gauge_core::validate::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisFailure {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The provider did not answer within its time budget.
    #[error("timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not contain the expected structure.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The payload parsed but the scorecard validator rejected it.
    #[error("rejected by validator: {0}")]
    Invalid(#[from] ValidationError),

    /// Credentials or endpoint are missing.
    #[error("provider is not configured")]
    NotConfigured,
}

impl AnalysisFailure {
    /// Stable tag recorded in attempt logs and activity details.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Api { .. } => "api",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Invalid(_) => "validation",
            Self::NotConfigured => "not_configured",
        }
    }
}

impl From<reqwest::Error> for AnalysisFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout { elapsed_ms: 0 }
        } else {
            Self::Http(e)
        }
    }
}
