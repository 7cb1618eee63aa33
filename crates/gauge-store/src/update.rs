//! Document update builder.
//!
//! Only `Some` fields are applied. An empty update leaves the document untouched.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl DocumentUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content_type.is_none()
            && self.page_count.is_none()
            && self.score.is_none()
    }
}

#[derive(Debug, Default)]
pub struct DocumentUpdateBuilder(DocumentUpdate);

impl DocumentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    #[must_use]
    pub fn content_type(mut self, val: impl Into<String>) -> Self {
        self.0.content_type = Some(val.into());
        self
    }

    #[must_use]
    pub const fn page_count(mut self, val: u32) -> Self {
        self.0.page_count = Some(val);
        self
    }

    #[must_use]
    pub const fn score(mut self, val: u8) -> Self {
        self.0.score = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> DocumentUpdate {
        self.0
    }
}
