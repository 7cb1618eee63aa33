//! # gauge-secrets
//!
//! External secret provider integrations for Gauge.
//!
//! Two uses: resolving `GAUGE_*` configuration overrides before the config is
//! loaded, and the secret-store liveness probe.

use gauge_config::InfisicalConfig;
use infisical::{AuthMethod, Client, secrets::ListSecretsRequest};
use thiserror::Error;

const ENV_BACKEND: &str = "GAUGE_SECRETS__BACKEND";
const ENV_INFISICAL_BASE_URL: &str = "GAUGE_INFISICAL__BASE_URL";
const ENV_INFISICAL_CLIENT_ID: &str = "GAUGE_INFISICAL__CLIENT_ID";
const ENV_INFISICAL_CLIENT_SECRET: &str = "GAUGE_INFISICAL__CLIENT_SECRET";
const ENV_INFISICAL_PROJECT_ID: &str = "GAUGE_INFISICAL__PROJECT_ID";
const ENV_INFISICAL_ENVIRONMENT: &str = "GAUGE_INFISICAL__ENVIRONMENT";
const ENV_INFISICAL_PATH: &str = "GAUGE_INFISICAL__PATH";

/// Only secrets with this key prefix are applied as configuration overrides.
const OVERRIDE_PREFIX: &str = "GAUGE_";

/// Result of resolving external secrets.
#[derive(Debug, Clone)]
pub enum SecretOverrides {
    Disabled,
    Values(Vec<(String, String)>),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Backend {
    None,
    Infisical,
}

impl Backend {
    fn from_env() -> Result<Self, SecretError> {
        let raw = std::env::var(ENV_BACKEND).unwrap_or_default();
        let normalized = raw.trim().to_ascii_lowercase();

        match normalized.as_str() {
            "" | "none" | "off" | "disabled" => Ok(Self::None),
            "infisical" => Ok(Self::Infisical),
            value => Err(SecretError::UnsupportedBackend(value.to_string())),
        }
    }
}

/// Connection settings for an Infisical project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfisicalSettings {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub project_id: String,
    pub environment: String,
    pub path: String,
}

impl InfisicalSettings {
    fn from_env() -> Result<Self, SecretError> {
        Ok(Self {
            base_url: std::env::var(ENV_INFISICAL_BASE_URL)
                .unwrap_or_else(|_| "https://app.infisical.com".to_string()),
            client_id: required_env(ENV_INFISICAL_CLIENT_ID)?,
            client_secret: required_env(ENV_INFISICAL_CLIENT_SECRET)?,
            project_id: required_env(ENV_INFISICAL_PROJECT_ID)?,
            environment: required_env(ENV_INFISICAL_ENVIRONMENT)?,
            path: std::env::var(ENV_INFISICAL_PATH).unwrap_or_else(|_| "/".to_string()),
        })
    }

    /// Settings from a loaded config section, or `None` when it is not configured.
    #[must_use]
    pub fn from_config(config: &InfisicalConfig) -> Option<Self> {
        config.is_configured().then(|| Self {
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            project_id: config.project_id.clone(),
            environment: config.environment.clone(),
            path: config.path.clone(),
        })
    }
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("unsupported secrets backend '{0}'")]
    UnsupportedBackend(String),
    #[error("required environment variable '{name}' is missing")]
    MissingEnvVar { name: &'static str },
    #[error("infisical error: {0}")]
    Infisical(#[from] infisical::InfisicalError),
}

fn required_env(name: &'static str) -> Result<String, SecretError> {
    std::env::var(name).map_err(|_| SecretError::MissingEnvVar { name })
}

/// Load secret key/value overrides from the configured external backend.
///
/// Expected naming convention is exact config keys (e.g., `GAUGE_OPENAI__API_KEY`).
///
/// # Errors
///
/// Returns [`SecretError`] if the backend name is unknown, its settings are
/// incomplete, or the backend call fails.
pub async fn load_env_overrides() -> Result<SecretOverrides, SecretError> {
    match Backend::from_env()? {
        Backend::None => Ok(SecretOverrides::Disabled),
        Backend::Infisical => {
            let settings = InfisicalSettings::from_env()?;
            let values = load_from_infisical(&settings).await?;
            tracing::debug!(count = values.len(), "loaded secret overrides");
            Ok(SecretOverrides::Values(values))
        }
    }
}

/// Authenticate and perform one secret lookup. Used as the secret-store liveness check.
///
/// Returns the number of secrets visible under the configured path.
///
/// # Errors
///
/// Returns [`SecretError::Infisical`] if login or the lookup fails.
pub async fn ping(settings: &InfisicalSettings) -> Result<usize, SecretError> {
    let secrets = list_secrets(settings).await?;
    Ok(secrets.len())
}

async fn load_from_infisical(
    settings: &InfisicalSettings,
) -> Result<Vec<(String, String)>, SecretError> {
    let mut values = list_secrets(settings)
        .await?
        .into_iter()
        .filter(|(key, _)| key.starts_with(OVERRIDE_PREFIX))
        .collect::<Vec<_>>();

    values.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(values)
}

async fn list_secrets(settings: &InfisicalSettings) -> Result<Vec<(String, String)>, SecretError> {
    let mut client = Client::builder()
        .base_url(&settings.base_url)
        .build()
        .await?;

    client
        .login(AuthMethod::new_universal_auth(
            &settings.client_id,
            &settings.client_secret,
        ))
        .await?;

    let request = ListSecretsRequest::builder(&settings.project_id, &settings.environment)
        .path(&settings.path)
        .recursive(true)
        .expand_secret_references(true)
        .build();

    Ok(client
        .secrets()
        .list(request)
        .await?
        .into_iter()
        .map(|secret| (secret.secret_key, secret.secret_value))
        .collect())
}
