//! Prioritized provider fallback chain.
//!
//! Providers are tried in configuration order: primary, secondary, static.
//! Unconfigured providers are dropped when the chain is built; the static
//! provider is always present and always last. Each attempt is bounded by a
//! per-provider timeout and its output must pass the scorecard validator.
//! The first accepted output wins. The chain itself never fails.

use std::time::{Duration, Instant};

use gauge_config::GaugeConfig;
use gauge_core::enums::ProviderKind;
use gauge_core::scorecard::Scorecard;
use gauge_core::validate::validate;
use serde::Serialize;

use crate::error::AnalysisFailure;
use crate::http::build_client;
use crate::prompt::AnalysisRequest;
use crate::provider::{OpenAiProvider, Provider, VertexProvider, static_scorecard};

/// Outcome of one provider attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub provider: ProviderKind,
    pub accepted: bool,
    /// Failure tag (`timeout`, `validation`, ...) when not accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub elapsed_ms: u64,
}

/// Result of running the chain: always a valid scorecard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    pub scorecard: Scorecard,
    pub provider: ProviderKind,
    pub attempts: Vec<Attempt>,
}

pub struct AnalysisChain {
    providers: Vec<Provider>,
    timeout: Duration,
}

impl AnalysisChain {
    /// Build a chain from an explicit provider list.
    ///
    /// Unconfigured providers are dropped. Exactly one static provider ends
    /// the chain, wherever the list placed it.
    #[must_use]
    pub fn new(providers: Vec<Provider>, timeout: Duration) -> Self {
        let mut providers: Vec<Provider> = providers
            .into_iter()
            .filter(|p| p.is_configured() && !matches!(p, Provider::Static))
            .collect();
        providers.push(Provider::Static);
        Self { providers, timeout }
    }

    /// Build the standard primary, secondary, static chain from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisFailure::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &GaugeConfig) -> Result<Self, AnalysisFailure> {
        let timeout = config.analysis.provider_timeout();
        let http = build_client(timeout)?;
        let max_chars = config.analysis.max_content_chars;

        let chain = Self::new(
            vec![
                Provider::Primary(VertexProvider::new(
                    http.clone(),
                    config.vertex.clone(),
                    max_chars,
                )),
                Provider::Secondary(OpenAiProvider::new(http, config.openai.clone(), max_chars)),
                Provider::Static,
            ],
            timeout,
        );
        tracing::debug!(providers = ?chain.provider_kinds(), "analysis chain built");
        Ok(chain)
    }

    /// Providers in the order they will be tried.
    #[must_use]
    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(Provider::kind).collect()
    }

    /// Run the chain for one document. Never fails.
    pub async fn run(&self, request: &AnalysisRequest) -> ChainOutcome {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let kind = provider.kind();
            let started = Instant::now();
            let result = self.attempt(provider, request).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match result {
                Ok(scorecard) => {
                    tracing::info!(provider = %kind, elapsed_ms, "analysis provider accepted");
                    attempts.push(Attempt {
                        provider: kind,
                        accepted: true,
                        error_kind: None,
                        reason: None,
                        elapsed_ms,
                    });
                    return ChainOutcome {
                        scorecard,
                        provider: kind,
                        attempts,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        provider = %kind,
                        kind = e.kind(),
                        elapsed_ms,
                        error = %e,
                        "analysis provider failed, advancing"
                    );
                    attempts.push(Attempt {
                        provider: kind,
                        accepted: false,
                        error_kind: Some(e.kind()),
                        reason: Some(e.to_string()),
                        elapsed_ms,
                    });
                }
            }
        }

        // The static provider cannot fail; this only runs if it somehow did.
        tracing::error!("every analysis provider failed, using static scorecard");
        ChainOutcome {
            scorecard: static_scorecard(request.document_type),
            provider: ProviderKind::StaticFallback,
            attempts,
        }
    }

    async fn attempt(
        &self,
        provider: &Provider,
        request: &AnalysisRequest,
    ) -> Result<Scorecard, AnalysisFailure> {
        let raw = tokio::time::timeout(self.timeout, provider.analyze(request))
            .await
            .map_err(|_| AnalysisFailure::Timeout {
                elapsed_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })??;
        Ok(validate(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_config::{OpenAiConfig, VertexConfig};
    use gauge_core::enums::DocumentType;

    fn unconfigured_chain() -> AnalysisChain {
        let http = reqwest::Client::new();
        AnalysisChain::new(
            vec![
                Provider::Primary(VertexProvider::new(
                    http.clone(),
                    VertexConfig::default(),
                    100,
                )),
                Provider::Secondary(OpenAiProvider::new(http, OpenAiConfig::default(), 100)),
            ],
            Duration::from_secs(1),
        )
    }

    #[test]
    fn unconfigured_providers_are_dropped_and_static_appended() {
        assert_eq!(
            unconfigured_chain().provider_kinds(),
            vec![ProviderKind::StaticFallback]
        );
    }

    #[test]
    fn static_appears_once_at_the_end() {
        let chain = AnalysisChain::new(
            vec![Provider::Static, Provider::Static],
            Duration::from_secs(1),
        );
        assert_eq!(chain.provider_kinds(), vec![ProviderKind::StaticFallback]);
    }

    #[tokio::test]
    async fn zero_configured_providers_yield_static_scorecard() {
        let request = AnalysisRequest::new("Plan", "text", DocumentType::MarketAnalysis);
        let outcome = unconfigured_chain().run(&request).await;

        assert_eq!(outcome.provider, ProviderKind::StaticFallback);
        assert_eq!(
            outcome.scorecard,
            static_scorecard(DocumentType::MarketAnalysis)
        );
        assert_eq!(outcome.attempts.len(), 1);
        assert!(outcome.attempts[0].accepted);
    }

    #[test]
    fn attempt_serializes_camel_case() {
        let attempt = Attempt {
            provider: ProviderKind::PrimaryInference,
            accepted: false,
            error_kind: Some("timeout"),
            reason: Some("timed out after 30000 ms".into()),
            elapsed_ms: 30_000,
        };
        let value = serde_json::to_value(&attempt).unwrap();
        assert_eq!(value["provider"], "primary_inference");
        assert_eq!(value["errorKind"], "timeout");
        assert_eq!(value["elapsedMs"], 30_000);
    }
}
