//! Runs every registered probe concurrently under one timeout.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use gauge_analysis::{OpenAiProvider, Provider, VertexProvider};
use gauge_config::GaugeConfig;
use gauge_secrets::InfisicalSettings;

use crate::probe::{DisabledProbe, HealthProbe};
use crate::probes::{
    self, CacheProbe, DocumentStoreProbe, InferenceProbe, ObjectStoreProbe, SecretStoreProbe,
};
use crate::report::HealthReport;

pub struct HealthAggregator {
    probes: Vec<Arc<dyn HealthProbe>>,
    timeout: Duration,
}

impl HealthAggregator {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            probes: Vec::new(),
            timeout,
        }
    }

    /// Register a probe. A later probe with the same service name replaces
    /// the earlier one in the report.
    pub fn register(&mut self, probe: Arc<dyn HealthProbe>) {
        self.probes.push(probe);
    }

    #[must_use]
    pub fn with_probe(mut self, probe: impl HealthProbe + 'static) -> Self {
        self.register(Arc::new(probe));
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The six standard services. Anything unconfigured, or whose client
    /// cannot be built, is registered as a [`DisabledProbe`] so the report
    /// still lists it.
    #[must_use]
    pub fn from_config(config: &GaugeConfig) -> Self {
        let timeout = config.health.probe_timeout();
        let mut aggregator = Self::new(timeout);

        let http = match gauge_analysis::http_client(timeout) {
            Ok(http) => Some(http),
            Err(e) => {
                tracing::warn!(error = %e, "health HTTP client unavailable");
                None
            }
        };
        let max_chars = config.analysis.max_content_chars;

        aggregator.register(match &http {
            Some(http) if config.vertex.is_configured() => Arc::new(InferenceProbe::new(
                probes::PRIMARY_INFERENCE,
                Provider::Primary(VertexProvider::new(
                    http.clone(),
                    config.vertex.clone(),
                    max_chars,
                )),
            )),
            _ => disabled(probes::PRIMARY_INFERENCE),
        });

        aggregator.register(match &http {
            Some(http) if config.openai.is_configured() => Arc::new(InferenceProbe::new(
                probes::SECONDARY_INFERENCE,
                Provider::Secondary(OpenAiProvider::new(
                    http.clone(),
                    config.openai.clone(),
                    max_chars,
                )),
            )),
            _ => disabled(probes::SECONDARY_INFERENCE),
        });

        aggregator.register(if config.turso.is_configured() {
            Arc::new(DocumentStoreProbe::new(
                &config.turso.url,
                &config.turso.auth_token,
            ))
        } else {
            disabled(probes::DOCUMENT_STORE)
        });

        aggregator.register(if config.r2.is_configured() {
            match ObjectStoreProbe::from_r2(&config.r2) {
                Ok(probe) => Arc::new(probe),
                Err(e) => {
                    tracing::warn!(error = %e, "object store client unavailable");
                    disabled(probes::OBJECT_STORE)
                }
            }
        } else {
            disabled(probes::OBJECT_STORE)
        });

        aggregator.register(match &http {
            Some(http) if config.cache.is_configured() => {
                Arc::new(CacheProbe::new(http.clone(), &config.cache))
            }
            _ => disabled(probes::CACHE),
        });

        aggregator.register(match InfisicalSettings::from_config(&config.infisical) {
            Some(settings) => Arc::new(SecretStoreProbe::new(settings)),
            None => disabled(probes::SECRET_STORE),
        });

        aggregator
    }

    /// Probe every service concurrently.
    ///
    /// Each probe runs in its own task under the aggregator timeout. A probe
    /// that panics, errors or exceeds the timeout is reported as `false`;
    /// nothing here fails.
    pub async fn check_all(&self) -> HealthReport {
        let tasks = self.probes.iter().map(|probe| {
            let service = probe.service().to_string();
            let probe = Arc::clone(probe);
            let timeout = self.timeout;
            let mut handle = tokio::spawn(async move { probe.check().await });
            async move {
                // The deadline bounds the task, so it holds even for a check
                // that blocks its worker thread.
                let healthy = match tokio::time::timeout(timeout, &mut handle).await {
                    Ok(Ok(healthy)) => healthy,
                    Ok(Err(e)) => {
                        tracing::warn!(service = %service, error = %e, "probe task failed");
                        false
                    }
                    Err(_) => {
                        handle.abort();
                        tracing::warn!(service = %service, ?timeout, "probe timed out");
                        false
                    }
                };
                (service, healthy)
            }
        });

        let report: HealthReport = join_all(tasks).await.into_iter().collect();
        tracing::info!(
            services = report.len(),
            all_healthy = report.all_healthy(),
            "health check complete"
        );
        report
    }
}

fn disabled(service: &str) -> Arc<dyn HealthProbe> {
    tracing::debug!(service, "not configured");
    Arc::new(DisabledProbe::new(service))
}
