//! Remote document database (Turso / libSQL server).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TursoConfig {
    /// `libsql://…` or `https://…` database URL.
    pub url: String,
    pub auth_token: String,
}

impl TursoConfig {
    /// A remote store is used only with both a URL and a token; otherwise the
    /// local database file takes over.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.auth_token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_and_token_are_both_required() {
        let mut config = TursoConfig::default();
        assert!(!config.is_configured());

        config.url = "libsql://gauge-acme.turso.io".into();
        assert!(!config.is_configured());

        config.auth_token = "   ".into();
        assert!(!config.is_configured());

        config.auth_token = "token".into();
        assert!(config.is_configured());
    }
}
