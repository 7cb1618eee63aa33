use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// A contact-form submission. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    /// Any additional form fields, kept verbatim.
    pub extra: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

/// Fields for `create_contact_submission`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub extra: serde_json::Value,
}
