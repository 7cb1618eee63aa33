//! A broken store must not change what `analyze_document` returns.

use std::time::Duration;

use gauge_analysis::{AnalysisChain, AnalysisService, static_scorecard};
use gauge_core::EntityId;
use gauge_core::entities::{
    Activity, Analysis, ContactSubmission, Document, NewActivity, NewContactSubmission,
    NewDocument, NewUser, User,
};
use gauge_core::enums::{DocumentType, ProviderKind};
use gauge_core::scorecard::Scorecard;
use gauge_store::{DocumentUpdate, EntityStore, StoreError};

struct DownStore;

fn down<T>() -> Result<T, StoreError> {
    Err(StoreError::Query("database unavailable".into()))
}

impl EntityStore for DownStore {
    async fn create_user(&self, _: NewUser) -> Result<User, StoreError> {
        down()
    }
    async fn get_user_by_username(&self, _: &str) -> Result<Option<User>, StoreError> {
        down()
    }
    async fn create_document(&self, _: NewDocument) -> Result<Document, StoreError> {
        down()
    }
    async fn get_document(&self, _: EntityId) -> Result<Option<Document>, StoreError> {
        down()
    }
    async fn get_documents_by_user_id(&self, _: EntityId) -> Result<Vec<Document>, StoreError> {
        down()
    }
    async fn update_document(
        &self,
        _: EntityId,
        _: DocumentUpdate,
    ) -> Result<Document, StoreError> {
        down()
    }
    async fn create_analysis(
        &self,
        _: EntityId,
        _: Scorecard,
        _: ProviderKind,
    ) -> Result<Analysis, StoreError> {
        down()
    }
    async fn get_analysis_by_document_id(
        &self,
        _: EntityId,
    ) -> Result<Option<Analysis>, StoreError> {
        down()
    }
    async fn create_analyzed_document(
        &self,
        _: NewDocument,
        _: Scorecard,
        _: ProviderKind,
    ) -> Result<(Document, Analysis), StoreError> {
        down()
    }
    async fn create_activity(&self, _: NewActivity) -> Result<Activity, StoreError> {
        down()
    }
    async fn get_activities(&self, _: EntityId, _: u32) -> Result<Vec<Activity>, StoreError> {
        down()
    }
    async fn create_contact_submission(
        &self,
        _: NewContactSubmission,
    ) -> Result<ContactSubmission, StoreError> {
        down()
    }
    async fn get_contact_submissions(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        down()
    }
}

#[tokio::test]
async fn store_failure_still_returns_scorecard() {
    let service = AnalysisService::new(
        AnalysisChain::new(Vec::new(), Duration::from_secs(1)),
        DownStore,
    );
    let result = service
        .analyze_document_detailed("Plan", "content", "business_plan", 1)
        .await;

    assert_eq!(
        result.outcome.scorecard,
        static_scorecard(DocumentType::BusinessPlan)
    );
    assert!(result.document.is_none());
}
