//! # gauge-config
//!
//! Layered configuration loading for Gauge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GAUGE_*` prefix, `__` as separator)
//! 2. Secret-store overrides (see `gauge-secrets`)
//! 3. Project-level `.gauge/config.toml`
//! 4. User-level `~/.config/gauge/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GAUGE_OPENAI__API_KEY` -> `openai.api_key`, `GAUGE_R2__ACCOUNT_ID` -> `r2.account_id`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! Every external dependency has its own section with an `is_configured()`
//! check. An unconfigured section is never an error: the provider or probe
//! backed by it is simply skipped or reported unhealthy.
//!
//! # Usage
//!
//! ```no_run
//! use gauge_config::GaugeConfig;
//!
//! let config = GaugeConfig::load().expect("config");
//!
//! if config.vertex.is_configured() {
//!     println!("Primary model: {}", config.vertex.model);
//! }
//! ```

mod analysis;
mod cache;
mod error;
mod general;
mod health;
mod infisical;
mod openai;
mod r2;
mod turso;
mod vertex;

pub use analysis::AnalysisSettings;
pub use cache::CacheConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use health::HealthSettings;
pub use infisical::InfisicalConfig;
pub use openai::OpenAiConfig;
pub use r2::{R2Config, R2_REGION};
pub use turso::TursoConfig;
pub use vertex::VertexConfig;

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Prefix shared by every Gauge environment variable.
pub const ENV_PREFIX: &str = "GAUGE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GaugeConfig {
    #[serde(default)]
    pub vertex: VertexConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub turso: TursoConfig,
    #[serde(default)]
    pub r2: R2Config,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub infisical: InfisicalConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub health: HealthSettings,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl GaugeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`. The binary loads it into the process environment first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env_overrides(&[])
    }

    /// Load configuration with externally resolved `GAUGE_*` key/value pairs
    /// layered below the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_env_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with_overrides(overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain without external overrides.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with_overrides(&[])
    }

    fn figment_with_overrides(overrides: &[(String, String)]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".gauge/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Secret-store overrides
        if let Some(toml) = overrides_to_toml(overrides) {
            figment = figment.merge(Toml::string(&toml));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make the analysis chain or health checks unusable.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.provider_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.provider_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.analysis.max_content_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_content_chars".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.health.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "health.probe_timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gauge").join("config.toml"))
    }
}

/// Render `GAUGE_SECTION__FIELD=value` pairs as a TOML document with dotted keys.
///
/// Values are typed the way figment types environment variables: booleans and
/// integers stay unquoted, everything else becomes a string. Keys without a
/// section separator are ignored. Later duplicates win.
fn overrides_to_toml(overrides: &[(String, String)]) -> Option<String> {
    let mut entries = BTreeMap::new();
    for (key, value) in overrides {
        let Some(path) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let segments = path
            .split("__")
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>();
        if segments.len() < 2 || segments.iter().any(|s| !is_bare_key(s)) {
            continue;
        }
        entries.insert(segments.join("."), toml_value(value));
    }

    if entries.is_empty() {
        return None;
    }
    Some(
        entries
            .into_iter()
            .map(|(key, value)| format!("{key} = {value}\n"))
            .collect(),
    )
}

fn is_bare_key(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn toml_value(raw: &str) -> String {
    if let Ok(flag) = raw.parse::<bool>() {
        return flag.to_string();
    }
    if let Ok(number) = raw.parse::<i64>() {
        return number.to_string();
    }
    toml::Value::String(raw.to_string()).to_string()
}
