//! Tag enums for Gauge entities.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of an improvement area in a scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Case-insensitive parse. Returns `None` for anything that is not a known level.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentType
// ---------------------------------------------------------------------------

/// Kind of business document submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    BusinessPlan,
    PitchDeck,
    FinancialStatement,
    MarketAnalysis,
    Other,
}

impl DocumentType {
    pub const ALL: [Self; 5] = [
        Self::BusinessPlan,
        Self::PitchDeck,
        Self::FinancialStatement,
        Self::MarketAnalysis,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BusinessPlan => "business_plan",
            Self::PitchDeck => "pitch_deck",
            Self::FinancialStatement => "financial_statement",
            Self::MarketAnalysis => "market_analysis",
            Self::Other => "other",
        }
    }

    /// Human-readable label used in prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BusinessPlan => "business plan",
            Self::PitchDeck => "pitch deck",
            Self::FinancialStatement => "financial statement",
            Self::MarketAnalysis => "market analysis",
            Self::Other => "business document",
        }
    }

    /// Lenient parse: case-insensitive, spaces and hyphens treated as underscores.
    /// Unknown labels map to [`DocumentType::Other`].
    #[must_use]
    pub fn from_label(raw: &str) -> Self {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActivityType
// ---------------------------------------------------------------------------

/// Tag of an append-only activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    DocumentUpload,
    UserRegistered,
    ContactSubmitted,
}

impl ActivityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DocumentUpload => "document_upload",
            Self::UserRegistered => "user_registered",
            Self::ContactSubmitted => "contact_submitted",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProviderKind
// ---------------------------------------------------------------------------

/// Which analysis provider produced a scorecard. Declaration order is chain priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    PrimaryInference,
    SecondaryInference,
    StaticFallback,
}

impl ProviderKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryInference => "primary_inference",
            Self::SecondaryInference => "secondary_inference",
            Self::StaticFallback => "static_fallback",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
