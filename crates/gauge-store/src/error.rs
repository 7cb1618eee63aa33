//! Store error types for gauge-store.

use gauge_core::EntityId;
use gauge_core::errors::CoreError;
use thiserror::Error;

/// Errors from entity store operations.
///
/// `DuplicateAnalysis` and `DuplicateUsername` are invariant violations and
/// are meant to reach the caller. Everything else is an infrastructure failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A second analysis was requested for a document that already has one.
    #[error("Analysis already exists for document {document_id}")]
    DuplicateAnalysis { document_id: EntityId },

    /// The username is already registered (exact, case-sensitive match).
    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    /// Lookup miss or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Password hashing or hash parsing failed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// A SQL query failed or returned data that could not be mapped.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl StoreError {
    pub(crate) const fn not_found(entity: &'static str, id: EntityId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Core(CoreError::Validation(message.into()))
    }

    /// Whether this error is a lookup miss.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }
}
