//! The probe capability and the disabled probe used for unconfigured services.

use futures::future::BoxFuture;

/// A liveness check for one external service.
///
/// `check` resolves to `true` only when the service answered a minimal
/// request correctly. Implementations report failures as `false`; the
/// aggregator additionally treats a panic or a timeout as `false`.
pub trait HealthProbe: Send + Sync {
    /// Stable service name used as the report key.
    fn service(&self) -> &str;

    fn check(&self) -> BoxFuture<'_, bool>;
}

/// Stands in for a service whose configuration is missing. Always `false`,
/// so the report still lists the service.
#[derive(Debug, Clone)]
pub struct DisabledProbe {
    service: String,
}

impl DisabledProbe {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl HealthProbe for DisabledProbe {
    fn service(&self) -> &str {
        &self.service
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async { false })
    }
}

/// Turn a probe result into the boolean signal, logging the failure.
pub(crate) fn report<E: std::fmt::Display>(service: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            tracing::debug!(service, "probe healthy");
            true
        }
        Err(e) => {
            tracing::warn!(service, error = %e, "probe failed");
            false
        }
    }
}
