//! Shared HTTP helpers for the inference providers.

use std::time::Duration;

use crate::error::AnalysisFailure;

/// Longest response body kept in an `Api` failure message.
const MAX_ERROR_BODY: usize = 512;

/// Build the HTTP client shared by all inference providers.
///
/// # Errors
///
/// Returns [`AnalysisFailure::Http`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, AnalysisFailure> {
    reqwest::Client::builder()
        .user_agent(concat!("gauge/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(AnalysisFailure::Http)
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success, otherwise
/// [`AnalysisFailure::Api`] with the status code and the (truncated) body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AnalysisFailure> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(AnalysisFailure::Api {
        status: status.as_u16(),
        message: body.chars().take(MAX_ERROR_BODY).collect(),
    })
}
