//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Default local database path.
fn default_database_path() -> String {
    String::from(".gauge/gauge.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Local libSQL file used when no remote database is configured.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            database_path: default_database_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.database_path, ".gauge/gauge.db");
    }
}
