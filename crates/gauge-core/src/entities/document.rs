use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// Characters per page used when a page count is estimated from text content.
pub const CHARS_PER_PAGE: usize = 3_000;

/// An uploaded document. `score` mirrors the `overall_score` of its analysis
/// once one exists.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
    pub content_type: String,
    pub content: String,
    pub page_count: u32,
    pub score: Option<u8>,
    pub uploaded_at: DateTime<Utc>,
}

/// Fields for `create_document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub user_id: EntityId,
    pub title: String,
    pub content_type: String,
    pub content: String,
    pub page_count: u32,
}

impl NewDocument {
    /// Build a new document, estimating the page count from the content length.
    #[must_use]
    pub fn from_text(user_id: EntityId, title: &str, content_type: &str, content: &str) -> Self {
        Self {
            user_id,
            title: title.to_string(),
            content_type: content_type.to_string(),
            content: content.to_string(),
            page_count: estimate_page_count(content),
        }
    }
}

/// One page per [`CHARS_PER_PAGE`] characters, never less than one.
#[must_use]
pub fn estimate_page_count(content: &str) -> u32 {
    let pages = content.chars().count().div_ceil(CHARS_PER_PAGE).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_estimate() {
        assert_eq!(estimate_page_count(""), 1);
        assert_eq!(estimate_page_count("short"), 1);
        assert_eq!(estimate_page_count(&"a".repeat(3_000)), 1);
        assert_eq!(estimate_page_count(&"a".repeat(3_001)), 2);
        assert_eq!(estimate_page_count(&"é".repeat(9_000)), 3);
    }
}
