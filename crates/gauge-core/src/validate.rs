//! Lenient-but-bounded scorecard validation.
//!
//! Upstream providers return syntactically valid but semantically sloppy
//! output. Validation repairs what it can and rejects only when a required
//! top-level field is absent or cannot be interpreted:
//!
//! - numbers may arrive as integers, floats or numeric strings (`"85"`, `"85.5"`,
//!   `"85%"`); they are rounded and clamped to `[0, 100]`
//! - malformed `improvementAreas` entries are dropped, never fatal
//! - a missing or `null` required field is [`ValidationErrorKind::MissingField`]
//! - a present field of the wrong shape is [`ValidationErrorKind::MalformedEntry`]

use serde_json::{Map, Value};
use thiserror::Error;

use crate::enums::Priority;
use crate::scorecard::{ComparisonData, ImprovementArea, MAX_SCORE, Scorecard};

/// Why a raw provider output was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingField,
    MalformedEntry,
}

/// Rejection of a raw provider output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or `null`.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A required field is present but cannot be interpreted.
    #[error("malformed field '{field}': {reason}")]
    MalformedEntry { field: String, reason: String },
}

impl ValidationError {
    #[must_use]
    pub const fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MissingField { .. } => ValidationErrorKind::MissingField,
            Self::MalformedEntry { .. } => ValidationErrorKind::MalformedEntry,
        }
    }

    fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    fn malformed(field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validate and repair a raw provider output into a [`Scorecard`].
///
/// # Errors
///
/// Returns [`ValidationError`] when the value is not an object or a required
/// top-level field is absent or unparsable.
pub fn validate(raw: &Value) -> Result<Scorecard, ValidationError> {
    let Some(obj) = raw.as_object() else {
        return Err(ValidationError::malformed("$", "expected a JSON object"));
    };

    let overall_score = required_score(obj, "overallScore")?;
    let feasibility_score = required_score(obj, "feasibilityScore")?;
    let scalability_score = required_score(obj, "scalabilityScore")?;
    let financial_health_score = required_score(obj, "financialHealthScore")?;
    let innovation_score = required_score(obj, "innovationScore")?;
    let market_fit_score = required_score(obj, "marketFitScore")?;
    let confidence = required_score(obj, "confidence")?;

    let summary = match required(obj, "summary")? {
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(ValidationError::malformed(
                "summary",
                format!("expected a string, got {}", type_name(other)),
            ));
        }
    };

    let improvement_areas = match required(obj, "improvementAreas")? {
        Value::Array(entries) => entries.iter().filter_map(improvement_area).collect(),
        other => {
            return Err(ValidationError::malformed(
                "improvementAreas",
                format!("expected an array, got {}", type_name(other)),
            ));
        }
    };

    let comparison_data = match required(obj, "comparisonData")? {
        Value::Object(cmp) => ComparisonData {
            industry_average: required_score(cmp, "industryAverage")
                .map_err(|e| nest("comparisonData", e))?,
            top_performers: required_score(cmp, "topPerformers")
                .map_err(|e| nest("comparisonData", e))?,
        },
        other => {
            return Err(ValidationError::malformed(
                "comparisonData",
                format!("expected an object, got {}", type_name(other)),
            ));
        }
    };

    Ok(Scorecard {
        overall_score,
        feasibility_score,
        scalability_score,
        financial_health_score,
        innovation_score,
        market_fit_score,
        improvement_areas,
        comparison_data,
        summary,
        confidence,
    })
}

/// Reduce free-form model text to the JSON object it contains.
///
/// Strips Markdown code fences and extracts the outermost `{...}` span.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedEntry`] when no JSON object can be found
/// or the extracted span does not parse.
pub fn extract_json_object(text: &str) -> Result<Value, ValidationError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map_or(trimmed, |rest| rest.trim_end().trim_end_matches("```"));

    let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) else {
        return Err(ValidationError::malformed("$", "no JSON object in response"));
    };
    if end < start {
        return Err(ValidationError::malformed("$", "no JSON object in response"));
    }

    serde_json::from_str(&unfenced[start..=end])
        .map_err(|e| ValidationError::malformed("$", format!("invalid JSON: {e}")))
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::missing(field)),
        Some(value) => Ok(value),
    }
}

fn required_score(obj: &Map<String, Value>, field: &str) -> Result<u8, ValidationError> {
    let value = required(obj, field)?;
    parse_score(value).ok_or_else(|| {
        ValidationError::malformed(field, format!("not a number: {value}"))
    })
}

/// Parse a loosely typed number and clamp it into `[0, 100]`.
fn parse_score(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            let s = s.strip_suffix('%').unwrap_or(s).trim_end();
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    let clamped = number.round().clamp(0.0, f64::from(MAX_SCORE));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = clamped as u8;
    Some(score)
}

fn improvement_area(entry: &Value) -> Option<ImprovementArea> {
    let obj = entry.as_object()?;
    let area = obj.get("area")?.as_str()?.trim();
    if area.is_empty() {
        return None;
    }
    let score = parse_score(obj.get("score")?)?;
    let suggestion = obj.get("suggestion")?.as_str()?.trim().to_string();
    let priority = match obj.get("priority") {
        None | Some(Value::Null) => Priority::Medium,
        Some(Value::String(raw)) => Priority::parse(raw)?,
        Some(_) => return None,
    };
    Some(ImprovementArea {
        area: area.to_string(),
        score,
        suggestion,
        priority,
    })
}

fn nest(parent: &str, error: ValidationError) -> ValidationError {
    match error {
        ValidationError::MissingField { field } => ValidationError::MissingField {
            field: format!("{parent}.{field}"),
        },
        ValidationError::MalformedEntry { field, reason } => ValidationError::MalformedEntry {
            field: format!("{parent}.{field}"),
            reason,
        },
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn well_formed() -> Value {
        json!({
            "overallScore": 78,
            "feasibilityScore": 80,
            "scalabilityScore": 70,
            "financialHealthScore": 65,
            "innovationScore": 85,
            "marketFitScore": 75,
            "improvementAreas": [
                {"area": "Financial projections", "score": 60, "suggestion": "Add a cash flow forecast", "priority": "high"}
            ],
            "comparisonData": {"industryAverage": 68, "topPerformers": 90},
            "summary": "Solid plan with thin financials.",
            "confidence": 82
        })
    }

    #[test]
    fn accepts_well_formed_output() {
        let card = validate(&well_formed()).expect("valid");
        assert_eq!(card.overall_score, 78);
        assert_eq!(card.market_fit_score, 75);
        assert_eq!(card.improvement_areas.len(), 1);
        assert_eq!(card.improvement_areas[0].priority, Priority::High);
        assert_eq!(card.comparison_data.top_performers, 90);
        assert_eq!(card.summary, "Solid plan with thin financials.");
    }

    #[rstest]
    #[case(json!(150), 100)]
    #[case(json!(-12), 0)]
    #[case(json!(72.6), 73)]
    #[case(json!("64"), 64)]
    #[case(json!(" 55.4% "), 55)]
    #[case(json!(1e9), 100)]
    fn numbers_are_parsed_and_clamped(#[case] raw: Value, #[case] expected: u8) {
        let mut value = well_formed();
        value["overallScore"] = raw;
        let card = validate(&value).expect("lenient numbers accepted");
        assert_eq!(card.overall_score, expected);
    }

    #[rstest]
    #[case("marketFitScore")]
    #[case("confidence")]
    #[case("summary")]
    #[case("improvementAreas")]
    #[case("comparisonData")]
    fn missing_required_field_is_rejected(#[case] field: &str) {
        let mut value = well_formed();
        value.as_object_mut().unwrap().remove(field);
        let err = validate(&value).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MissingField);
        assert_eq!(err, ValidationError::missing(field));
    }

    #[test]
    fn null_field_counts_as_missing() {
        let mut value = well_formed();
        value["feasibilityScore"] = Value::Null;
        let err = validate(&value).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MissingField);
    }

    #[rstest]
    #[case("innovationScore", json!("very innovative"))]
    #[case("innovationScore", json!(true))]
    #[case("summary", json!(42))]
    #[case("improvementAreas", json!("none"))]
    #[case("comparisonData", json!([68, 90]))]
    fn unparsable_field_is_malformed(#[case] field: &str, #[case] raw: Value) {
        let mut value = well_formed();
        value[field] = raw;
        let err = validate(&value).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MalformedEntry);
    }

    #[test]
    fn missing_comparison_member_reports_nested_path() {
        let mut value = well_formed();
        value["comparisonData"] = json!({"industryAverage": 70});
        let err = validate(&value).unwrap_err();
        assert_eq!(err, ValidationError::missing("comparisonData.topPerformers"));
    }

    #[test]
    fn comparison_values_are_clamped() {
        let mut value = well_formed();
        value["comparisonData"] = json!({"industryAverage": "-5", "topPerformers": 240});
        let card = validate(&value).unwrap();
        assert_eq!(card.comparison_data.industry_average, 0);
        assert_eq!(card.comparison_data.top_performers, 100);
    }

    #[test]
    fn malformed_improvement_entries_are_dropped() {
        let mut value = well_formed();
        value["improvementAreas"] = json!([
            {"area": "Team", "score": 70, "suggestion": "Hire a CFO", "priority": "HIGH"},
            {"area": "Pricing", "score": "55", "suggestion": "Test tiers"},
            {"area": "", "score": 50, "suggestion": "empty area"},
            {"area": "Moat", "score": "strong", "suggestion": "bad score"},
            {"area": "Ops", "score": 40, "suggestion": "x", "priority": "urgent"},
            {"area": "Legal", "score": 40},
            "not an object",
            42
        ]);
        let card = validate(&value).unwrap();
        let areas: Vec<_> = card
            .improvement_areas
            .iter()
            .map(|a| (a.area.as_str(), a.priority))
            .collect();
        assert_eq!(
            areas,
            vec![("Team", Priority::High), ("Pricing", Priority::Medium)]
        );
    }

    #[test]
    fn empty_improvement_areas_allowed() {
        let mut value = well_formed();
        value["improvementAreas"] = json!([]);
        let card = validate(&value).unwrap();
        assert!(card.improvement_areas.is_empty());
    }

    #[test]
    fn non_object_rejected() {
        let err = validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MalformedEntry);
    }

    #[test]
    fn validated_scorecards_are_within_bounds() {
        let mut value = well_formed();
        value["scalabilityScore"] = json!(1000);
        value["improvementAreas"][0]["score"] = json!(-40);
        let card = validate(&value).unwrap();
        assert!(card.is_within_bounds());
    }

    #[test]
    fn extracts_json_from_fenced_text() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn extracts_json_surrounded_by_prose() {
        let text = "Here is the analysis: {\"a\": {\"b\": 2}} Hope it helps.";
        assert_eq!(extract_json_object(text).unwrap(), json!({"a": {"b": 2}}));
    }

    #[test]
    fn extract_rejects_text_without_object() {
        let err = extract_json_object("I cannot analyze this document.").unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MalformedEntry);
        assert!(extract_json_object("} nope {").is_err());
    }
}
