//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use super::SqlStore;
use crate::error::StoreError;

/// Initial schema: 5 tables, 2 indexes.
const MIGRATION_001: &str = include_str!("../../migrations/001_initial.sql");

impl SqlStore {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
