//! Probe failure types. Never surfaced to callers: a failure becomes `false`.

use gauge_analysis::AnalysisFailure;
use gauge_secrets::SecretError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("document store: {0}")]
    DocumentStore(#[from] libsql::Error),

    #[error("object store: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Unexpected(String),

    #[error("secret store: {0}")]
    SecretStore(#[from] SecretError),

    #[error("inference: {0}")]
    Inference(#[from] AnalysisFailure),
}
