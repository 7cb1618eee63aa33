//! Object store settings. Cloudflare R2 by default; any S3-compatible
//! endpoint works when `endpoint` is set.

use serde::{Deserialize, Serialize};

/// R2 accepts any region name; "auto" is the documented value.
pub const R2_REGION: &str = "auto";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct R2Config {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Bucket holding uploaded document bodies.
    pub bucket_name: String,
    /// Overrides the account-derived endpoint (local MinIO, other S3 hosts).
    pub endpoint: String,
}

impl Default for R2Config {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            bucket_name: "gauge-documents".to_string(),
            endpoint: String::new(),
        }
    }
}

impl R2Config {
    /// Credentials and a bucket are present, plus either an account id or an
    /// explicit endpoint to reach.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let reachable = !self.account_id.is_empty() || !self.endpoint.is_empty();
        reachable
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
            && !self.bucket_name.is_empty()
    }

    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.trim_end_matches('/').to_string();
        }
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}
