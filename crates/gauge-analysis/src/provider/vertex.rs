//! Primary inference provider: Vertex AI Gemini `generateContent`.
//!
//! One structured-output request per call (`responseMimeType:
//! application/json`), authenticated with an OAuth bearer token.

use gauge_config::VertexConfig;
use gauge_core::validate::extract_json_object;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AnalysisFailure;
use crate::http::check_response;
use crate::prompt::{AnalysisRequest, SYSTEM_INSTRUCTION, build_prompt};

const MAX_OUTPUT_TOKENS: u32 = 2_048;

pub struct VertexProvider {
    http: reqwest::Client,
    config: VertexConfig,
    max_content_chars: usize,
}

impl VertexProvider {
    #[must_use]
    pub const fn new(http: reqwest::Client, config: VertexConfig, max_content_chars: usize) -> Self {
        Self {
            http,
            config,
            max_content_chars,
        }
    }

    /// Project id, location, model and access token are all present.
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
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(request, self.max_content_chars) }],
            }],
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": 0.2,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        });

        let text = self.generate(&body).await?;
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
            "contents": [{ "role": "user", "parts": [{ "text": "ping" }] }],
            "generationConfig": { "maxOutputTokens": 1 },
        });
        let resp = self
            .http
            .post(self.config.generate_content_url())
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await?;
        check_response(resp).await.map(|_| ())
    }

    async fn generate(&self, body: &Value) -> Result<String, AnalysisFailure> {
        let resp = self
            .http
            .post(self.config.generate_content_url())
            .bearer_auth(&self.config.access_token)
            .json(body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AnalysisFailure::MalformedPayload(format!("response body: {e}")))?;
        parsed.text()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Result<String, AnalysisFailure> {
        let text: String = self
            .candidates
            .and_then(|mut candidates| candidates.drain(..).next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.trim().is_empty() {
            return Err(AnalysisFailure::MalformedPayload(
                "response contained no candidate text".into(),
            ));
        }
        Ok(text)
    }
}
