use gauge_config::GaugeConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &GaugeConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &GaugeConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let sections = [
        ("Vertex AI", "GAUGE_VERTEX", "GAUGE_VERTEX__PROJECT_ID", config.vertex.is_configured()),
        ("OpenAI", "GAUGE_OPENAI", "GAUGE_OPENAI__API_KEY", config.openai.is_configured()),
        ("Turso", "GAUGE_TURSO", "GAUGE_TURSO__URL", config.turso.is_configured()),
        ("R2", "GAUGE_R2", "GAUGE_R2__ACCOUNT_ID", config.r2.is_configured()),
        ("Cache", "GAUGE_CACHE", "GAUGE_CACHE__REST_URL", config.cache.is_configured()),
        (
            "Infisical",
            "GAUGE_INFISICAL",
            "GAUGE_INFISICAL__CLIENT_ID",
            config.infisical.is_configured(),
        ),
    ];

    sections
        .into_iter()
        .filter(|(_, prefix, _, configured)| !configured && has_env_prefix(&env_keys, prefix))
        .map(|(name, prefix, example, _)| {
            format!(
                "{name} config appears default while {prefix}* env vars exist. Use double underscores (example: {example})."
            )
        })
        .collect()
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use gauge_config::GaugeConfig;
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &GaugeConfig::default(),
            vec![
                ("GAUGE_TURSO_URL".to_string(), "libsql://demo".to_string()),
                ("GAUGE_R2_ACCOUNT_ID".to_string(), "abc".to_string()),
                ("GAUGE_OPENAI_API_KEY".to_string(), "sk".to_string()),
                ("GAUGE_LOG".to_string(), "debug".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("OpenAI"));
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let config = GaugeConfig {
            turso: gauge_config::TursoConfig {
                url: "libsql://demo".to_string(),
                auth_token: "token".to_string(),
                ..Default::default()
            },
            cache: gauge_config::CacheConfig {
                rest_url: "https://cache.example".to_string(),
                rest_token: "token".to_string(),
            },
            ..Default::default()
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("GAUGE_TURSO__URL".to_string(), "libsql://demo".to_string()),
                ("GAUGE_CACHE__REST_URL".to_string(), "https://cache.example".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }
}
