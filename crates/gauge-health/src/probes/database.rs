use futures::future::BoxFuture;
use libsql::Builder;

use crate::error::ProbeFailure;
use crate::probe::{HealthProbe, report};

/// `SELECT 1` against the remote libSQL database.
pub struct DocumentStoreProbe {
    url: String,
    auth_token: String,
}

impl DocumentStoreProbe {
    #[must_use]
    pub fn new(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: auth_token.into(),
        }
    }

    async fn ping(&self) -> Result<(), ProbeFailure> {
        let db = Builder::new_remote(self.url.clone(), self.auth_token.clone())
            .build()
            .await?;
        let conn = db.connect()?;
        let mut rows = conn.query("SELECT 1", ()).await?;
        match rows.next().await? {
            Some(row) if row.get::<i64>(0)? == 1 => Ok(()),
            _ => Err(ProbeFailure::Unexpected("SELECT 1 returned no row".into())),
        }
    }
}

impl HealthProbe for DocumentStoreProbe {
    fn service(&self) -> &str {
        super::DOCUMENT_STORE
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { report(self.service(), self.ping().await) })
    }
}
