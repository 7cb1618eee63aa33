use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::enums::ProviderKind;
use crate::scorecard::Scorecard;

/// The immutable analysis of one document. At most one exists per document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: EntityId,
    pub document_id: EntityId,
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub scorecard: Scorecard,
    pub created_at: DateTime<Utc>,
}
