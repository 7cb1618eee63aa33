//! Static fallback provider: a fixed, conservative scorecard per document type.
//!
//! No network, no randomness, always valid. This is the chain's terminal step.

use gauge_core::enums::{DocumentType, Priority};
use gauge_core::scorecard::{ComparisonData, ImprovementArea, Scorecard};

/// Confidence reported by every static scorecard.
pub const STATIC_CONFIDENCE: u8 = 25;

struct Baseline {
    overall: u8,
    feasibility: u8,
    scalability: u8,
    financial_health: u8,
    innovation: u8,
    market_fit: u8,
    industry_average: u8,
    top_performers: u8,
    focus: (&'static str, &'static str),
}

const fn baseline(document_type: DocumentType) -> Baseline {
    match document_type {
        DocumentType::BusinessPlan => Baseline {
            overall: 62,
            feasibility: 65,
            scalability: 60,
            financial_health: 58,
            innovation: 60,
            market_fit: 64,
            industry_average: 60,
            top_performers: 85,
            focus: (
                "Financial projections",
                "Support revenue and cost assumptions with sourced figures.",
            ),
        },
        DocumentType::PitchDeck => Baseline {
            overall: 60,
            feasibility: 58,
            scalability: 64,
            financial_health: 52,
            innovation: 66,
            market_fit: 61,
            industry_average: 58,
            top_performers: 86,
            focus: (
                "Traction evidence",
                "Lead with measurable traction: users, revenue or signed pilots.",
            ),
        },
        DocumentType::FinancialStatement => Baseline {
            overall: 58,
            feasibility: 60,
            scalability: 55,
            financial_health: 63,
            innovation: 50,
            market_fit: 56,
            industry_average: 57,
            top_performers: 84,
            focus: (
                "Cash runway",
                "State monthly burn and runway explicitly alongside the statements.",
            ),
        },
        DocumentType::MarketAnalysis => Baseline {
            overall: 61,
            feasibility: 60,
            scalability: 58,
            financial_health: 54,
            innovation: 59,
            market_fit: 67,
            industry_average: 59,
            top_performers: 85,
            focus: (
                "Market sizing",
                "Derive the addressable market bottom-up, not only top-down.",
            ),
        },
        DocumentType::Other => Baseline {
            overall: 55,
            feasibility: 55,
            scalability: 55,
            financial_health: 55,
            innovation: 55,
            market_fit: 55,
            industry_average: 55,
            top_performers: 82,
            focus: (
                "Structure",
                "Organize the document around problem, solution, market and financials.",
            ),
        },
    }
}

/// The fixed scorecard for `document_type`.
#[must_use]
pub fn static_scorecard(document_type: DocumentType) -> Scorecard {
    let b = baseline(document_type);
    Scorecard {
        overall_score: b.overall,
        feasibility_score: b.feasibility,
        scalability_score: b.scalability,
        financial_health_score: b.financial_health,
        innovation_score: b.innovation,
        market_fit_score: b.market_fit,
        improvement_areas: vec![
            ImprovementArea {
                area: b.focus.0.to_string(),
                score: b.financial_health.min(b.overall),
                suggestion: b.focus.1.to_string(),
                priority: Priority::High,
            },
            ImprovementArea {
                area: "Detailed review".to_string(),
                score: b.overall,
                suggestion: "Re-run the analysis once an inference backend is available \
                             for document-specific feedback."
                    .to_string(),
                priority: Priority::Medium,
            },
        ],
        comparison_data: ComparisonData {
            industry_average: b.industry_average,
            top_performers: b.top_performers,
        },
        summary: format!(
            "Baseline assessment for a {}. Automated analysis was unavailable, so these \
             scores are typical values for this document type rather than a review of its content.",
            document_type.label()
        ),
        confidence: STATIC_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::validate::validate;

    #[test]
    fn every_static_scorecard_passes_validation() {
        for kind in DocumentType::ALL {
            let card = static_scorecard(kind);
            assert!(card.is_within_bounds());
            let raw = serde_json::to_value(&card).unwrap();
            assert_eq!(validate(&raw).unwrap(), card, "{kind}");
        }
    }

    #[test]
    fn static_scorecard_is_deterministic() {
        assert_eq!(
            static_scorecard(DocumentType::PitchDeck),
            static_scorecard(DocumentType::PitchDeck)
        );
        assert_ne!(
            static_scorecard(DocumentType::PitchDeck).overall_score,
            static_scorecard(DocumentType::FinancialStatement).overall_score
        );
    }
}
