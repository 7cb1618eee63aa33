//! Secondary inference provider: OpenAI-compatible `chat/completions` in JSON mode.

use gauge_config::OpenAiConfig;
use gauge_core::validate::extract_json_object;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AnalysisFailure;
use crate::http::check_response;
use crate::prompt::{AnalysisRequest, SYSTEM_INSTRUCTION, build_prompt};

pub struct OpenAiProvider {
    http: reqwest::Client,
    config: OpenAiConfig,
    max_content_chars: usize,
}

impl OpenAiProvider {
    #[must_use]
    pub const fn new(http: reqwest::Client, config: OpenAiConfig, max_content_chars: usize) -> Self {
        Self {
            http,
            config,
            max_content_chars,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Request a scorecard and return the JSON object the model produced.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisFailure`] on transport error, non-success status,
    /// or a response without a JSON object.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisFailure> {
        if !self.is_configured() {
            return Err(AnalysisFailure::NotConfigured);
        }
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": build_prompt(request, self.max_content_chars) },
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.2,
        });

        let text = self.complete(&body).await?;
        extract_json_object(&text).map_err(|e| AnalysisFailure::MalformedPayload(e.to_string()))
    }

    /// Minimal one-token completion, used as the liveness check.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisFailure`] if the backend cannot be reached or rejects the call.
    pub async fn ping(&self) -> Result<(), AnalysisFailure> {
        if !self.is_configured() {
            return Err(AnalysisFailure::NotConfigured);
        }
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": "ping" }],
            "max_tokens": 1,
        });
        let resp = self.post(&body).send().await?;
        check_response(resp).await.map(|_| ())
    }

    fn post(&self, body: &Value) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .post(self.config.chat_completions_url())
            .bearer_auth(&self.config.api_key)
            .json(body);
        if !self.config.organization.is_empty() {
            req = req.header("OpenAI-Organization", self.config.organization.as_str());
        }
        req
    }

    async fn complete(&self, body: &Value) -> Result<String, AnalysisFailure> {
        let resp = check_response(self.post(body).send().await?).await?;
        let parsed: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| AnalysisFailure::MalformedPayload(format!("response body: {e}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AnalysisFailure::MalformedPayload("response contained no message content".into()))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
