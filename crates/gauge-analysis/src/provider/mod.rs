//! Analysis providers.
//!
//! One contract, three variants, selected once at startup. Inference variants
//! return the raw JSON object the backend produced; the chain validates it.

mod fallback;
mod openai;
mod vertex;

pub use fallback::{STATIC_CONFIDENCE, static_scorecard};
pub use openai::OpenAiProvider;
pub use vertex::VertexProvider;

use gauge_core::enums::ProviderKind;
use serde_json::Value;

use crate::error::AnalysisFailure;
use crate::prompt::AnalysisRequest;

pub enum Provider {
    Primary(VertexProvider),
    Secondary(OpenAiProvider),
    Static,
}

impl Provider {
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        match self {
            Self::Primary(_) => ProviderKind::PrimaryInference,
            Self::Secondary(_) => ProviderKind::SecondaryInference,
            Self::Static => ProviderKind::StaticFallback,
        }
    }

    /// Static fallback is always configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self {
            Self::Primary(p) => p.is_configured(),
            Self::Secondary(p) => p.is_configured(),
            Self::Static => true,
        }
    }

    /// Produce a raw scorecard candidate for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisFailure`] for any transport, status or payload
    /// problem. The static variant never fails.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisFailure> {
        match self {
            Self::Primary(p) => p.analyze(request).await,
            Self::Secondary(p) => p.analyze(request).await,
            Self::Static => serde_json::to_value(static_scorecard(request.document_type))
                .map_err(|e| AnalysisFailure::MalformedPayload(e.to_string())),
        }
    }

    /// Liveness check against the backing service. Static is always live.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisFailure`] if the backend is unconfigured, unreachable
    /// or rejects a minimal request.
    pub async fn ping(&self) -> Result<(), AnalysisFailure> {
        match self {
            Self::Primary(p) => p.ping().await,
            Self::Secondary(p) => p.ping().await,
            Self::Static => Ok(()),
        }
    }
}
