//! Prompt construction shared by the inference providers.

use gauge_core::enums::DocumentType;
use gauge_core::scorecard::Scorecard;

/// System instruction sent with every analysis request.
pub const SYSTEM_INSTRUCTION: &str = "You are a venture analyst scoring business documents. \
Respond with a single JSON object and nothing else. Every score is an integer from 0 to 100.";

/// One document to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub title: String,
    pub content: String,
    pub document_type: DocumentType,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(title: &str, content: &str, document_type: DocumentType) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            document_type,
        }
    }
}

/// Cut `content` to at most `max_chars` characters, on a char boundary.
/// Returns the kept slice and whether anything was dropped.
#[must_use]
pub fn bounded_content(content: &str, max_chars: usize) -> (&str, bool) {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&content[..byte_idx], true),
        None => (content, false),
    }
}

/// Build the user prompt: document metadata, bounded content and the required
/// response shape as a JSON Schema.
#[must_use]
pub fn build_prompt(request: &AnalysisRequest, max_chars: usize) -> String {
    let (content, truncated) = bounded_content(&request.content, max_chars);
    let schema = serde_json::to_string_pretty(&Scorecard::response_schema()).unwrap_or_default();
    let note = if truncated {
        "\n[content truncated]"
    } else {
        ""
    };

    format!(
        "Analyze the following {label} titled \"{title}\".\n\
         Score overall quality, feasibility, scalability, financial health, innovation \
         and market fit, list concrete improvement areas with a priority of low, medium \
         or high, compare it with the industry average and top performers, summarize it \
         in a few sentences and state your confidence.\n\n\
         Respond with JSON matching this schema:\n{schema}\n\n\
         --- DOCUMENT ---\n{content}{note}\n--- END DOCUMENT ---",
        label = request.document_type.label(),
        title = request.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_cut_on_char_boundary() {
        let (kept, truncated) = bounded_content("héllo wörld", 4);
        assert_eq!(kept, "héll");
        assert!(truncated);

        let (kept, truncated) = bounded_content("short", 10);
        assert_eq!(kept, "short");
        assert!(!truncated);

        let (kept, truncated) = bounded_content("exact", 5);
        assert_eq!(kept, "exact");
        assert!(!truncated);
    }

    #[test]
    fn prompt_embeds_metadata_schema_and_bounded_content() {
        let request = AnalysisRequest::new(
            "Solar Co",
            &"x".repeat(50),
            DocumentType::PitchDeck,
        );
        let prompt = build_prompt(&request, 10);
        assert!(prompt.contains("pitch deck titled \"Solar Co\""));
        assert!(prompt.contains("\"marketFitScore\""));
        assert!(prompt.contains(&format!("{}\n[content truncated]", "x".repeat(10))));
        assert!(!prompt.contains(&"x".repeat(11)));
    }
}
