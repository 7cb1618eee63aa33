//! Document analysis service: chain, persistence and activity log.

use gauge_core::EntityId;
use gauge_core::entities::{Document, NewActivity, NewDocument};
use gauge_core::enums::{ActivityType, DocumentType};
use gauge_core::scorecard::Scorecard;
use gauge_store::EntityStore;
use serde_json::json;

use crate::chain::{AnalysisChain, ChainOutcome};
use crate::prompt::AnalysisRequest;

/// Everything `analyze_document_detailed` produced.
#[derive(Debug, Clone)]
pub struct AnalyzedDocument {
    pub outcome: ChainOutcome,
    /// `None` when persistence failed; the scorecard is still valid.
    pub document: Option<Document>,
}

/// Turns uploaded documents into persisted scorecards.
///
/// Receives its chain and store; holds no global state.
pub struct AnalysisService<S> {
    chain: AnalysisChain,
    store: S,
}

impl<S: EntityStore> AnalysisService<S> {
    #[must_use]
    pub const fn new(chain: AnalysisChain, store: S) -> Self {
        Self { chain, store }
    }

    #[must_use]
    pub const fn chain(&self) -> &AnalysisChain {
        &self.chain
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Analyze and persist a document. Never fails: provider failures fall
    /// through the chain and persistence failures are logged.
    pub async fn analyze_document(
        &self,
        title: &str,
        content: &str,
        document_type: &str,
        user_id: EntityId,
    ) -> Scorecard {
        self.analyze_document_detailed(title, content, document_type, user_id)
            .await
            .outcome
            .scorecard
    }

    /// Like [`Self::analyze_document`], also returning the winning provider,
    /// the attempt record and the stored document.
    pub async fn analyze_document_detailed(
        &self,
        title: &str,
        content: &str,
        document_type: &str,
        user_id: EntityId,
    ) -> AnalyzedDocument {
        let document_type = DocumentType::from_label(document_type);
        let request = AnalysisRequest::new(title, content, document_type);
        let outcome = self.chain.run(&request).await;
        let document = self.persist(&request, user_id, &outcome).await;
        AnalyzedDocument { outcome, document }
    }

    async fn persist(
        &self,
        request: &AnalysisRequest,
        user_id: EntityId,
        outcome: &ChainOutcome,
    ) -> Option<Document> {
        let new_document = NewDocument::from_text(
            user_id,
            &request.title,
            request.document_type.as_str(),
            &request.content,
        );

        let document = match self
            .store
            .create_analyzed_document(new_document, outcome.scorecard.clone(), outcome.provider)
            .await
        {
            Ok((document, _analysis)) => document,
            Err(e) => {
                tracing::error!(user_id, error = %e, "failed to persist analyzed document");
                return None;
            }
        };

        let activity = NewActivity {
            user_id,
            document_id: Some(document.id),
            activity_type: ActivityType::DocumentUpload,
            details: json!({
                "title": document.title,
                "documentType": request.document_type,
                "score": outcome.scorecard.overall_score,
                "provider": outcome.provider,
                "attempts": outcome.attempts,
            }),
        };
        if let Err(e) = self.store.create_activity(activity).await {
            tracing::error!(
                user_id,
                document_id = document.id,
                error = %e,
                "failed to record document upload activity"
            );
        }

        tracing::info!(
            user_id,
            document_id = document.id,
            provider = %outcome.provider,
            score = outcome.scorecard.overall_score,
            "document analyzed"
        );
        Some(document)
    }
}
