use futures::future::BoxFuture;
use gauge_analysis::Provider;

use crate::error::ProbeFailure;
use crate::probe::{HealthProbe, report};

/// Minimal completion against an inference backend.
pub struct InferenceProbe {
    service: String,
    provider: Provider,
}

impl InferenceProbe {
    #[must_use]
    pub fn new(service: impl Into<String>, provider: Provider) -> Self {
        Self {
            service: service.into(),
            provider,
        }
    }
}

impl HealthProbe for InferenceProbe {
    fn service(&self) -> &str {
        &self.service
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            let result = self.provider.ping().await.map_err(ProbeFailure::from);
            report(&self.service, result)
        })
    }
}
