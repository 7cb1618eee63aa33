use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::enums::ActivityType;

/// An append-only audit record of a user- or document-affecting event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: EntityId,
    pub user_id: EntityId,
    pub document_id: Option<EntityId>,
    pub activity_type: ActivityType,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Fields for `create_activity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub user_id: EntityId,
    pub document_id: Option<EntityId>,
    pub activity_type: ActivityType,
    pub details: serde_json::Value,
}
