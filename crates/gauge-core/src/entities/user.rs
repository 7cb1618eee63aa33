use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// A registered account. Usernames are unique and matched case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    /// Argon2id PHC string. Never serialized out of the store.
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for `create_user`. The password is hashed by the store before it is kept.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub user_type: String,
}
