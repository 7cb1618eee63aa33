//! Infisical (secret store) configuration.

use serde::{Deserialize, Serialize};

/// Default Infisical API.
fn default_base_url() -> String {
    String::from("https://app.infisical.com")
}

/// Default secret path.
fn default_path() -> String {
    String::from("/")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InfisicalConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Universal-auth machine identity client ID.
    #[serde(default)]
    pub client_id: String,

    /// Universal-auth machine identity client secret.
    #[serde(default)]
    pub client_secret: String,

    #[serde(default)]
    pub project_id: String,

    /// Environment slug (e.g., `dev`, `prod`).
    #[serde(default)]
    pub environment: String,

    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for InfisicalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
            project_id: String::new(),
            environment: String::new(),
            path: default_path(),
        }
    }
}

impl InfisicalConfig {
    /// Check if the Infisical config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.project_id.is_empty()
            && !self.environment.is_empty()
    }
}
