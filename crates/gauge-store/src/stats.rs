//! Per-user summary metrics, read straight from the store on every call.

use gauge_core::EntityId;
use serde::Serialize;

use crate::EntityStore;
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub document_count: u64,
    pub average_score: u8,
}

/// Count a user's documents and average their scores.
///
/// A document without a score contributes 0 but still counts. The mean is
/// rounded half away from zero; no documents yields `{0, 0}`.
///
/// # Errors
///
/// Returns [`StoreError`] if the documents cannot be read.
pub async fn compute_stats<S: EntityStore>(
    store: &S,
    user_id: EntityId,
) -> Result<DocumentStats, StoreError> {
    let documents = store.get_documents_by_user_id(user_id).await?;
    let scores = documents.iter().map(|d| d.score.unwrap_or(0));
    Ok(summarize(scores))
}

fn summarize(scores: impl Iterator<Item = u8>) -> DocumentStats {
    let (count, sum) = scores.fold((0u64, 0u64), |(count, sum), score| {
        (count + 1, sum + u64::from(score))
    });
    if count == 0 {
        return DocumentStats::default();
    }
    // Integer half-up on non-negative values equals half away from zero.
    let mean = (2 * sum + count) / (2 * count);
    DocumentStats {
        document_count: count,
        average_score: u8::try_from(mean).unwrap_or(u8::MAX),
    }
}
