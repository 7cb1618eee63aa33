//! Health aggregation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-probe timeout, in milliseconds.
const fn default_probe_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthSettings {
    /// A probe that has not answered within this budget reports `false`.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl HealthSettings {
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
