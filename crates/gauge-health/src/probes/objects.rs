use std::sync::Arc;

use futures::future::BoxFuture;
use gauge_config::{R2Config, R2_REGION};
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;

use crate::error::ProbeFailure;
use crate::probe::{HealthProbe, report};

/// Top-level list on the S3-compatible (R2) bucket.
pub struct ObjectStoreProbe {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreProbe {
    /// Wrap an existing object store.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Build an R2 client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeFailure::ObjectStore`] if the builder rejects the settings.
    pub fn from_r2(config: &R2Config) -> Result<Self, ProbeFailure> {
        let endpoint = config.endpoint_url();
        let store = AmazonS3Builder::new()
            .with_allow_http(endpoint.starts_with("http://"))
            .with_endpoint(endpoint)
            .with_bucket_name(&config.bucket_name)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_region(R2_REGION)
            .with_virtual_hosted_style_request(false)
            .build()?;
        Ok(Self::new(Arc::new(store)))
    }

    async fn ping(&self) -> Result<(), ProbeFailure> {
        self.store.list_with_delimiter(None).await?;
        Ok(())
    }
}

impl HealthProbe for ObjectStoreProbe {
    fn service(&self) -> &str {
        super::OBJECT_STORE
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { report(self.service(), self.ping().await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    #[tokio::test]
    async fn in_memory_store_is_healthy() {
        let probe = ObjectStoreProbe::new(Arc::new(InMemory::new()));
        assert!(probe.check().await);
    }

    #[test]
    fn r2_client_builds_from_config() {
        let config = R2Config {
            account_id: "abc".into(),
            access_key_id: "key".into(),
            secret_access_key: "secret".into(),
            ..Default::default()
        };
        assert!(ObjectStoreProbe::from_r2(&config).is_ok());
    }
}
