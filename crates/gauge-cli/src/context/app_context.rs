use std::path::Path;

use anyhow::Context;
use gauge_analysis::{AnalysisChain, AnalysisService};
use gauge_config::GaugeConfig;
use gauge_store::{AnyStore, MemoryStore, SqlStore};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AnalysisService<AnyStore>,
    pub config: GaugeConfig,
}

impl AppContext {
    pub async fn init(config: GaugeConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let store = open_store(&config, flags.memory).await?;
        tracing::debug!(backend = store.backend(), "entity store ready");

        let chain = AnalysisChain::from_config(&config)
            .context("failed to build analysis provider chain")?;

        Ok(Self {
            service: AnalysisService::new(chain, store),
            config,
        })
    }

    pub fn store(&self) -> &AnyStore {
        self.service.store()
    }
}

/// Remote Turso when configured, otherwise the local database file.
/// `--memory` skips both.
async fn open_store(config: &GaugeConfig, memory: bool) -> anyhow::Result<AnyStore> {
    if memory {
        return Ok(AnyStore::Memory(MemoryStore::new()));
    }

    if config.turso.is_configured() {
        match SqlStore::open_remote(&config.turso.url, &config.turso.auth_token).await {
            Ok(store) => return Ok(AnyStore::Sql(store)),
            Err(error) => {
                tracing::warn!(
                    %error,
                    "failed to open remote document store; falling back to local"
                );
            }
        }
    }

    let path = &config.general.database_path;
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let store = SqlStore::open_local(path)
        .await
        .with_context(|| format!("failed to open local database at {path}"))?;
    Ok(AnyStore::Sql(store))
}
