use anyhow::Context;
use gauge_config::GaugeConfig;
use gauge_secrets::SecretOverrides;

/// Resolve configuration: `.env`, then secret-store overrides, then figment layering.
pub async fn load_config() -> anyhow::Result<GaugeConfig> {
    load_dotenv()?;

    let env_overrides = match gauge_secrets::load_env_overrides().await {
        Ok(SecretOverrides::Disabled) => Vec::new(),
        Ok(SecretOverrides::Values(values)) => values,
        Err(error) => {
            if is_ci() {
                return Err(anyhow::anyhow!(
                    "failed to load configured secret backend in CI: {error}"
                ));
            }

            tracing::warn!(%error, "failed to load external secrets; continuing with local config");
            Vec::new()
        }
    };

    GaugeConfig::load_with_env_overrides(&env_overrides).map_err(anyhow::Error::from)
}

fn is_ci() -> bool {
    std::env::var("CI")
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    // A project directory may keep its .env next to .gauge/
    for dir in cwd.ancestors() {
        if dir.join(".gauge").is_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).with_context(|| {
                    format!("failed to load dotenv file at {}", env_path.display())
                })?;
                return Ok(());
            }
            break;
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}
