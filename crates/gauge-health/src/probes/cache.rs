use std::time::{SystemTime, UNIX_EPOCH};

use futures::future::BoxFuture;
use gauge_config::CacheConfig;
use serde::Deserialize;

use crate::error::ProbeFailure;
use crate::probe::{HealthProbe, report};

const PROBE_KEY: &str = "gauge:health";

/// SET then GET round-trip against an Upstash-style REST cache.
pub struct CacheProbe {
    http: reqwest::Client,
    rest_url: String,
    rest_token: String,
    fixed_nonce: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommandReply {
    result: Option<serde_json::Value>,
    error: Option<String>,
}

impl CacheProbe {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &CacheConfig) -> Self {
        Self {
            http,
            rest_url: config.rest_url.trim_end_matches('/').to_string(),
            rest_token: config.rest_token.clone(),
            fixed_nonce: None,
        }
    }

    async fn command(&self, path: &str) -> Result<serde_json::Value, ProbeFailure> {
        let resp = self
            .http
            .get(format!("{}/{path}", self.rest_url))
            .bearer_auth(&self.rest_token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProbeFailure::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        let reply: CommandReply = resp.json().await?;
        if let Some(error) = reply.error {
            return Err(ProbeFailure::Unexpected(error));
        }
        Ok(reply.result.unwrap_or(serde_json::Value::Null))
    }

    async fn ping(&self) -> Result<(), ProbeFailure> {
        let nonce = self.fixed_nonce.clone().unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default()
                .to_string()
        });

        self.command(&format!("set/{PROBE_KEY}/{nonce}")).await?;
        let read = self.command(&format!("get/{PROBE_KEY}")).await?;
        if read.as_str() == Some(nonce.as_str()) {
            Ok(())
        } else {
            Err(ProbeFailure::Unexpected(format!(
                "read back {read} instead of {nonce}"
            )))
        }
    }
}

impl HealthProbe for CacheProbe {
    fn service(&self) -> &str {
        super::CACHE
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { report(self.service(), self.ping().await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn probe(server: &MockServer) -> CacheProbe {
        let config = CacheConfig {
            rest_url: format!("{}/", server.base_url()),
            rest_token: "cache-token".into(),
        };
        CacheProbe {
            fixed_nonce: Some("n-1".into()),
            ..CacheProbe::new(reqwest::Client::new(), &config)
        }
    }

    #[tokio::test]
    async fn round_trip_is_healthy() {
        let server = MockServer::start();
        let set = server.mock(|when, then| {
            when.method(GET)
                .path("/set/gauge:health/n-1")
                .header("authorization", "Bearer cache-token");
            then.status(200).json_body(json!({"result": "OK"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/get/gauge:health");
            then.status(200).json_body(json!({"result": "n-1"}));
        });

        assert!(probe(&server).check().await);
        set.assert();
    }

    #[tokio::test]
    async fn stale_read_is_unhealthy() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/set/gauge:health/n-1");
            then.status(200).json_body(json!({"result": "OK"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/get/gauge:health");
            then.status(200).json_body(json!({"result": "n-0"}));
        });

        assert!(!probe(&server).check().await);
    }

    #[tokio::test]
    async fn rejected_token_is_unhealthy() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(401)
                .json_body(json!({"error": "Unauthorized"}));
        });

        assert!(!probe(&server).check().await);
    }
}
