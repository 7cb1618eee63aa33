//! Analysis chain settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-provider attempt budget, in seconds.
const fn default_provider_timeout_secs() -> u64 {
    30
}

/// Default number of content characters included in a prompt.
const fn default_max_content_chars() -> usize {
    12_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisSettings {
    /// Upper bound on a single provider attempt. Exceeding it is a failure.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Content characters sent to an inference backend; the rest is cut.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            provider_timeout_secs: default_provider_timeout_secs(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl AnalysisSettings {
    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.provider_timeout(), Duration::from_secs(30));
        assert_eq!(settings.max_content_chars, 12_000);
    }
}
