//! # gauge-analysis
//!
//! Turns an uploaded business document into a normalized scorecard.
//!
//! - [`provider`]: the three analysis providers (Vertex AI Gemini,
//!   OpenAI-compatible chat, static fallback)
//! - [`chain`]: the prioritized fallback chain with per-attempt timeouts and
//!   validation
//! - [`service`]: `analyze_document`, which runs the chain and persists the
//!   document, its analysis and a `document_upload` activity
//!
//! Provider failures never escape this crate. The worst case is the static
//! scorecard for the document's type.

pub mod chain;
pub mod error;
mod http;
pub mod prompt;
pub mod provider;
pub mod service;

pub use chain::{AnalysisChain, Attempt, ChainOutcome};
pub use error::AnalysisFailure;
pub use prompt::AnalysisRequest;
pub use provider::{OpenAiProvider, Provider, VertexProvider, static_scorecard};
pub use service::{AnalysisService, AnalyzedDocument};

/// Build the shared inference HTTP client. Exposed for health probes that
/// ping the same backends.
///
/// # Errors
///
/// Returns [`AnalysisFailure::Http`] if the client cannot be built.
pub fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, AnalysisFailure> {
    http::build_client(timeout)
}
