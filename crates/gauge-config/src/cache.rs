//! REST cache (Upstash-compatible) configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// REST endpoint (e.g., `https://eu1-fancy-cat-31337.upstash.io`).
    #[serde(default)]
    pub rest_url: String,

    /// Bearer token for the REST endpoint.
    #[serde(default)]
    pub rest_token: String,
}

impl CacheConfig {
    /// Check if the cache config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.rest_url.is_empty() && !self.rest_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!CacheConfig::default().is_configured());
    }

    #[test]
    fn not_configured_without_token() {
        let config = CacheConfig {
            rest_url: "https://cache.example".into(),
            rest_token: String::new(),
        };
        assert!(!config.is_configured());
    }
}
