//! OpenAI-compatible (secondary inference provider) configuration.

use serde::{Deserialize, Serialize};

/// Default chat model.
fn default_model() -> String {
    String::from("gpt-4o-mini")
}

/// Default API base URL.
fn default_api_base() -> String {
    String::from("https://api.openai.com/v1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: String,

    /// Chat completion model.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL including the version segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Optional organization header.
    #[serde(default)]
    pub organization: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            api_base: default_api_base(),
            organization: String::new(),
        }
    }
}

impl OpenAiConfig {
    /// Check if the OpenAI config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.model.is_empty() && !self.api_base.is_empty()
    }

    /// `chat/completions` URL under the configured base.
    #[must_use]
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}
