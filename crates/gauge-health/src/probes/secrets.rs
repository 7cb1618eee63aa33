use futures::future::BoxFuture;
use gauge_secrets::InfisicalSettings;

use crate::error::ProbeFailure;
use crate::probe::{HealthProbe, report};

/// Universal-auth login plus one secret lookup.
pub struct SecretStoreProbe {
    settings: InfisicalSettings,
}

impl SecretStoreProbe {
    #[must_use]
    pub const fn new(settings: InfisicalSettings) -> Self {
        Self { settings }
    }

    async fn ping(&self) -> Result<(), ProbeFailure> {
        let count = gauge_secrets::ping(&self.settings).await?;
        tracing::debug!(count, "secret store reachable");
        Ok(())
    }
}

impl HealthProbe for SecretStoreProbe {
    fn service(&self) -> &str {
        super::SECRET_STORE
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { report(self.service(), self.ping().await) })
    }
}
