//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use gauge_config::GaugeConfig;

#[test]
fn loads_inference_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[vertex]
project_id = "acme-prod"
location = "europe-west4"
access_token = "ya29.token"
model = "gemini-1.5-pro"

[openai]
api_key = "sk-toml"
model = "gpt-4o"
"#,
        )?;

        let config: GaugeConfig = Figment::from(Serialized::defaults(GaugeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.vertex.location, "europe-west4");
        assert_eq!(config.vertex.model, "gemini-1.5-pro");
        assert!(config.vertex.is_configured());
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.api_base, "https://api.openai.com/v1");
        assert!(config.openai.is_configured());
        Ok(())
    });
}

#[test]
fn loads_dependency_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[turso]
url = "libsql://gauge.turso.io"
auth_token = "turso-token"

[r2]
account_id = "toml-account"
access_key_id = "toml-key"
secret_access_key = "toml-secret"
endpoint = "http://localhost:9000"

[cache]
rest_url = "https://cache.example"
rest_token = "cache-token"

[health]
probe_timeout_ms = 1500
"#,
        )?;

        let config: GaugeConfig = Figment::from(Serialized::defaults(GaugeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.turso.is_configured());
        assert!(config.r2.is_configured());
        assert_eq!(config.r2.bucket_name, "gauge-documents");
        assert_eq!(config.r2.endpoint_url(), "http://localhost:9000");
        assert!(config.cache.is_configured());
        assert!(!config.infisical.is_configured());
        assert_eq!(config.health.probe_timeout_ms, 1500);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[openai]
api_key = "sk-toml"
"#,
        )?;
        jail.set_env("GAUGE_OPENAI__API_KEY", "sk-env");

        let config: GaugeConfig = Figment::from(Serialized::defaults(GaugeConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("GAUGE_").split("__"))
            .extract()?;

        assert_eq!(config.openai.api_key, "sk-env");
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gauge")?;
        jail.create_file(
            ".gauge/config.toml",
            r#"
[analysis]
provider_timeout_secs = 12
max_content_chars = 4000
"#,
        )?;

        let config = GaugeConfig::load().expect("config loads");
        assert_eq!(config.analysis.provider_timeout_secs, 12);
        assert_eq!(config.analysis.max_content_chars, 4000);
        Ok(())
    });
}
