//! The normalized analysis result.
//!
//! Field names follow the camelCase wire format that inference backends are
//! instructed to produce, so a validated scorecard serializes back into the
//! same shape it was requested in.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::enums::Priority;

/// Upper bound of every score in a scorecard.
pub const MAX_SCORE: u8 = 100;

/// One suggested area of improvement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementArea {
    pub area: String,
    #[schemars(range(max = 100))]
    pub score: u8,
    pub suggestion: String,
    pub priority: Priority,
}

/// How the document compares with its peer group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonData {
    #[schemars(range(max = 100))]
    pub industry_average: u8,
    #[schemars(range(max = 100))]
    pub top_performers: u8,
}

/// Normalized quality scorecard for one document.
///
/// Every numeric field is an integer in `[0, 100]`. Instances are only ever
/// produced by [`crate::validate::validate`] or by code that builds them from
/// constants, so the bound holds wherever a `Scorecard` exists.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    #[schemars(range(max = 100))]
    pub overall_score: u8,
    #[schemars(range(max = 100))]
    pub feasibility_score: u8,
    #[schemars(range(max = 100))]
    pub scalability_score: u8,
    #[schemars(range(max = 100))]
    pub financial_health_score: u8,
    #[schemars(range(max = 100))]
    pub innovation_score: u8,
    #[schemars(range(max = 100))]
    pub market_fit_score: u8,
    pub improvement_areas: Vec<ImprovementArea>,
    pub comparison_data: ComparisonData,
    pub summary: String,
    #[schemars(range(max = 100))]
    pub confidence: u8,
}

impl Scorecard {
    /// JSON Schema of the scorecard, embedded in inference prompts as the
    /// required response shape.
    #[must_use]
    pub fn response_schema() -> serde_json::Value {
        serde_json::to_value(schema_for!(Self)).unwrap_or_default()
    }

    /// All numeric fields, for bound checks.
    #[must_use]
    pub fn numeric_fields(&self) -> Vec<u8> {
        let mut values = vec![
            self.overall_score,
            self.feasibility_score,
            self.scalability_score,
            self.financial_health_score,
            self.innovation_score,
            self.market_fit_score,
            self.comparison_data.industry_average,
            self.comparison_data.top_performers,
            self.confidence,
        ];
        values.extend(self.improvement_areas.iter().map(|area| area.score));
        values
    }

    /// Whether every numeric field lies within `[0, 100]`.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.numeric_fields().into_iter().all(|v| v <= MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_schema_lists_camel_case_fields() {
        let schema = Scorecard::response_schema();
        let properties = schema["properties"].as_object().expect("properties");
        for field in [
            "overallScore",
            "feasibilityScore",
            "scalabilityScore",
            "financialHealthScore",
            "innovationScore",
            "marketFitScore",
            "improvementAreas",
            "comparisonData",
            "summary",
            "confidence",
        ] {
            assert!(properties.contains_key(field), "missing {field}");
        }
    }
}
