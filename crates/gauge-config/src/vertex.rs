//! Vertex AI (primary inference provider) configuration.

use serde::{Deserialize, Serialize};

/// Default Gemini model.
fn default_model() -> String {
    String::from("gemini-1.5-flash")
}

/// Default Vertex AI region.
fn default_location() -> String {
    String::from("us-central1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VertexConfig {
    /// Google Cloud project ID.
    #[serde(default)]
    pub project_id: String,

    /// Vertex AI region (e.g., `us-central1`).
    #[serde(default = "default_location")]
    pub location: String,

    /// OAuth access token for the Vertex AI API.
    #[serde(default)]
    pub access_token: String,

    /// Publisher model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Custom API base URL. If empty, built from `location`.
    #[serde(default)]
    pub endpoint: String,
}

impl Default for VertexConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            location: default_location(),
            access_token: String::new(),
            model: default_model(),
            endpoint: String::new(),
        }
    }
}

impl VertexConfig {
    /// Check if the full credential and endpoint configuration is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.project_id.is_empty()
            && !self.location.is_empty()
            && !self.access_token.is_empty()
            && !self.model.is_empty()
    }

    /// API base URL (scheme + host), without a trailing slash.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.is_empty() {
            format!("https://{}-aiplatform.googleapis.com", self.location)
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Full `generateContent` URL for the configured model.
    #[must_use]
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.endpoint_url(),
            self.project_id,
            self.location,
            self.model
        )
    }
}
