//! # gauge-store
//!
//! Entity persistence for Gauge.
//!
//! [`EntityStore`] is the storage-agnostic boundary. Two implementations:
//!
//! - [`MemoryStore`]: the reference implementation, maps keyed by id behind a lock.
//! - [`SqlStore`]: libSQL (local file, `:memory:`, or Turso remote) with embedded
//!   migrations. A UNIQUE constraint on `analyses.document_id` backs the
//!   one-analysis-per-document invariant under concurrency.
//!
//! Invariants enforced at this boundary, by both implementations:
//! - ids are assigned by the store, monotonic per entity kind, never reused
//! - a second analysis for a document fails with [`StoreError::DuplicateAnalysis`]
//! - usernames match exactly (case-sensitive)
//! - patched scores stay within 0..=100 and patched titles are non-blank
//! - lists are ordered most-recent-first

pub mod any;
pub mod credentials;
pub mod error;
pub mod memory;
pub mod sql;
pub mod stats;
pub mod update;

use std::future::Future;

use gauge_core::EntityId;
use gauge_core::entities::{
    Activity, Analysis, ContactSubmission, Document, NewActivity, NewContactSubmission,
    NewDocument, NewUser, User,
};
use gauge_core::enums::ProviderKind;
use gauge_core::scorecard::{MAX_SCORE, Scorecard};

pub use any::AnyStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use sql::SqlStore;
pub use stats::{DocumentStats, compute_stats};
pub use update::{DocumentUpdate, DocumentUpdateBuilder};

/// Persistence boundary for every Gauge entity.
///
/// The store exclusively owns all instances: every method returns clones.
pub trait EntityStore: Send + Sync {
    /// Register a user. The password is hashed before it is kept.
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Exact, case-sensitive username lookup.
    fn get_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn create_document(
        &self,
        document: NewDocument,
    ) -> impl Future<Output = Result<Document, StoreError>> + Send;

    fn get_document(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Documents owned by `user_id`, newest first.
    fn get_documents_by_user_id(
        &self,
        user_id: EntityId,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send;

    /// Apply a patch. Unknown id is `NotFound`; an empty patch returns the
    /// document unchanged.
    fn update_document(
        &self,
        id: EntityId,
        update: DocumentUpdate,
    ) -> impl Future<Output = Result<Document, StoreError>> + Send;

    /// Record the analysis of an existing document and mirror its overall
    /// score onto the document.
    ///
    /// Fails with `DuplicateAnalysis` if the document already has one and with
    /// `NotFound` if the document does not exist.
    fn create_analysis(
        &self,
        document_id: EntityId,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> impl Future<Output = Result<Analysis, StoreError>> + Send;

    fn get_analysis_by_document_id(
        &self,
        document_id: EntityId,
    ) -> impl Future<Output = Result<Option<Analysis>, StoreError>> + Send;

    /// Create a document with its score already set together with its
    /// analysis, as one unit. Either both exist afterwards or neither does.
    fn create_analyzed_document(
        &self,
        document: NewDocument,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> impl Future<Output = Result<(Document, Analysis), StoreError>> + Send;

    fn create_activity(
        &self,
        activity: NewActivity,
    ) -> impl Future<Output = Result<Activity, StoreError>> + Send;

    /// Most recent activities of a user, newest first, at most `limit`.
    fn get_activities(
        &self,
        user_id: EntityId,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Activity>, StoreError>> + Send;

    fn create_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> impl Future<Output = Result<ContactSubmission, StoreError>> + Send;

    /// All contact submissions, newest first.
    fn get_contact_submissions(
        &self,
    ) -> impl Future<Output = Result<Vec<ContactSubmission>, StoreError>> + Send;

    /// Verify a username/password pair. `Ok(None)` for an unknown user or a
    /// wrong password.
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send {
        async move {
            let Some(user) = self.get_user_by_username(username).await? else {
                return Ok(None);
            };
            let verified = credentials::verify_password(password, &user.password_hash)?;
            Ok(verified.then_some(user))
        }
    }
}

/// Reject blank required text before anything is stored.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Shared input checks for `create_user`.
pub(crate) fn check_new_user(user: &NewUser) -> Result<(), StoreError> {
    require_text("username", &user.username)?;
    if user.password.is_empty() {
        return Err(StoreError::validation("password must not be empty"));
    }
    Ok(())
}

/// Shared input checks for `update_document`. A patch may only set what
/// `create_document` and the analysis path would accept.
pub(crate) fn check_update(update: &DocumentUpdate) -> Result<(), StoreError> {
    if let Some(title) = &update.title {
        require_text("title", title)?;
    }
    if let Some(score) = update.score.filter(|score| *score > MAX_SCORE) {
        return Err(StoreError::validation(format!(
            "score must be between 0 and {MAX_SCORE}, got {score}"
        )));
    }
    Ok(())
}
