//! Runtime-selected store.
//!
//! The binary decides between the in-memory and the libSQL store at startup
//! from flags and configuration. `AnyStore` lets everything downstream stay
//! generic over one concrete [`EntityStore`].

use gauge_core::EntityId;
use gauge_core::entities::{
    Activity, Analysis, ContactSubmission, Document, NewActivity, NewContactSubmission,
    NewDocument, NewUser, User,
};
use gauge_core::enums::ProviderKind;
use gauge_core::scorecard::Scorecard;

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::sql::SqlStore;
use crate::update::DocumentUpdate;
use crate::EntityStore;

pub enum AnyStore {
    Memory(MemoryStore),
    Sql(SqlStore),
}

impl AnyStore {
    /// Short backend label for logs and CLI output.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Sql(_) => "libsql",
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            AnyStore::Memory($store) => $call.await,
            AnyStore::Sql($store) => $call.await,
        }
    };
}

impl EntityStore for AnyStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        dispatch!(self, s => s.create_user(user))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        dispatch!(self, s => s.get_user_by_username(username))
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document, StoreError> {
        dispatch!(self, s => s.create_document(document))
    }

    async fn get_document(&self, id: EntityId) -> Result<Option<Document>, StoreError> {
        dispatch!(self, s => s.get_document(id))
    }

    async fn get_documents_by_user_id(
        &self,
        user_id: EntityId,
    ) -> Result<Vec<Document>, StoreError> {
        dispatch!(self, s => s.get_documents_by_user_id(user_id))
    }

    async fn update_document(
        &self,
        id: EntityId,
        update: DocumentUpdate,
    ) -> Result<Document, StoreError> {
        dispatch!(self, s => s.update_document(id, update))
    }

    async fn create_analysis(
        &self,
        document_id: EntityId,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> Result<Analysis, StoreError> {
        dispatch!(self, s => s.create_analysis(document_id, scorecard, provider))
    }

    async fn get_analysis_by_document_id(
        &self,
        document_id: EntityId,
    ) -> Result<Option<Analysis>, StoreError> {
        dispatch!(self, s => s.get_analysis_by_document_id(document_id))
    }

    async fn create_analyzed_document(
        &self,
        document: NewDocument,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> Result<(Document, Analysis), StoreError> {
        dispatch!(self, s => s.create_analyzed_document(document, scorecard, provider))
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        dispatch!(self, s => s.create_activity(activity))
    }

    async fn get_activities(
        &self,
        user_id: EntityId,
        limit: u32,
    ) -> Result<Vec<Activity>, StoreError> {
        dispatch!(self, s => s.get_activities(user_id, limit))
    }

    async fn create_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, StoreError> {
        dispatch!(self, s => s.create_contact_submission(submission))
    }

    async fn get_contact_submissions(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        dispatch!(self, s => s.get_contact_submissions())
    }
}
