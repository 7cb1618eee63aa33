//! End-to-end fallback behaviour against mocked inference backends.

use std::time::Duration;

use gauge_analysis::{
    AnalysisChain, AnalysisService, OpenAiProvider, Provider, VertexProvider, http_client,
    static_scorecard,
};
use gauge_config::{OpenAiConfig, VertexConfig};
use gauge_core::enums::{ActivityType, DocumentType, ProviderKind};
use gauge_store::{EntityStore, MemoryStore};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const VERTEX_PATH: &str =
    "/v1/projects/acme/locations/us-central1/publishers/google/models/gemini-1.5-flash:generateContent";
const USER: i64 = 42;

fn vertex_config(server: &MockServer) -> VertexConfig {
    VertexConfig {
        project_id: "acme".into(),
        access_token: "ya29.test".into(),
        endpoint: server.base_url(),
        ..Default::default()
    }
}

fn openai_config(server: &MockServer) -> OpenAiConfig {
    OpenAiConfig {
        api_key: "sk-test".into(),
        api_base: format!("{}/v1", server.base_url()),
        ..Default::default()
    }
}

fn chain(vertex: VertexConfig, openai: OpenAiConfig, timeout: Duration) -> AnalysisChain {
    let http = http_client(Duration::from_secs(5)).unwrap();
    AnalysisChain::new(
        vec![
            Provider::Primary(VertexProvider::new(http.clone(), vertex, 4_000)),
            Provider::Secondary(OpenAiProvider::new(http, openai, 4_000)),
            Provider::Static,
        ],
        timeout,
    )
}

fn card_json(overall: u8) -> Value {
    json!({
        "overallScore": overall,
        "feasibilityScore": 70,
        "scalabilityScore": 64,
        "financialHealthScore": 59,
        "innovationScore": 77,
        "marketFitScore": 73,
        "improvementAreas": [
            {"area": "Pricing", "score": 48, "suggestion": "Test two price points.", "priority": "high"}
        ],
        "comparisonData": {"industryAverage": 61, "topPerformers": 88},
        "summary": "Credible plan with an untested pricing model.",
        "confidence": 81
    })
}

fn gemini_reply(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
}

fn openai_reply(text: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] })
}

#[tokio::test]
async fn primary_timeout_without_secondary_persists_static_scorecard() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(VERTEX_PATH);
        then.status(200)
            .json_body(gemini_reply(&card_json(90).to_string()))
            .delay(Duration::from_millis(600));
    });

    let service = AnalysisService::new(
        chain(
            vertex_config(&server),
            OpenAiConfig::default(),
            Duration::from_millis(100),
        ),
        MemoryStore::new(),
    );
    let result = service
        .analyze_document_detailed("Q3 plan", "We sell solar kits.", "business_plan", USER)
        .await;

    let expected = static_scorecard(DocumentType::BusinessPlan);
    assert_eq!(result.outcome.scorecard, expected);
    assert_eq!(result.outcome.provider, ProviderKind::StaticFallback);
    assert_eq!(result.outcome.attempts.len(), 2);
    assert_eq!(result.outcome.attempts[0].error_kind, Some("timeout"));

    let store = service.store();
    let documents = store.get_documents_by_user_id(USER).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].score, Some(expected.overall_score));

    let analysis = store
        .get_analysis_by_document_id(documents[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(analysis.provider, ProviderKind::StaticFallback);

    let activities = store.get_activities(USER, 10).await.unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].activity_type, ActivityType::DocumentUpload);
    assert_eq!(activities[0].document_id, Some(documents[0].id));
    assert_eq!(activities[0].details["provider"], "static_fallback");
}

#[tokio::test]
async fn primary_missing_market_fit_falls_through_to_secondary() {
    let server = MockServer::start();
    let mut incomplete = card_json(95);
    incomplete.as_object_mut().unwrap().remove("marketFitScore");

    let primary = server.mock(|when, then| {
        when.method(POST)
            .path(VERTEX_PATH)
            .header("authorization", "Bearer ya29.test")
            .json_body_includes(
                json!({"generationConfig": {"responseMimeType": "application/json"}}).to_string(),
            );
        then.status(200)
            .json_body(gemini_reply(&incomplete.to_string()));
    });
    let secondary = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test")
            .json_body_includes(
                json!({"model": "gpt-4o-mini", "response_format": {"type": "json_object"}})
                    .to_string(),
            );
        then.status(200)
            .json_body(openai_reply(&card_json(67).to_string()));
    });

    let service = AnalysisService::new(
        chain(
            vertex_config(&server),
            openai_config(&server),
            Duration::from_secs(5),
        ),
        MemoryStore::new(),
    );
    let result = service
        .analyze_document_detailed("Deck", "Slides.", "pitch deck", USER)
        .await;

    primary.assert();
    secondary.assert();
    assert_eq!(result.outcome.provider, ProviderKind::SecondaryInference);
    assert_eq!(result.outcome.scorecard.overall_score, 67);
    assert_eq!(result.outcome.scorecard.market_fit_score, 73);
    assert_eq!(result.outcome.attempts[0].error_kind, Some("validation"));
    assert!(
        result.outcome.attempts[0]
            .reason
            .as_deref()
            .unwrap()
            .contains("marketFitScore")
    );

    let document = result.document.unwrap();
    assert_eq!(document.score, Some(67));
    assert_eq!(document.content_type, "pitch_deck");
    let analysis = service
        .store()
        .get_analysis_by_document_id(document.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(analysis.scorecard, result.outcome.scorecard);
    assert_eq!(analysis.provider, ProviderKind::SecondaryInference);
}

#[tokio::test]
async fn primary_server_error_then_secondary_garbage_ends_at_static() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(VERTEX_PATH);
        then.status(503).body("overloaded");
    });
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .json_body(openai_reply("Sorry, I cannot help with that."));
    });

    let chain = chain(
        vertex_config(&server),
        openai_config(&server),
        Duration::from_secs(5),
    );
    let outcome = chain
        .run(&gauge_analysis::AnalysisRequest::new(
            "Numbers",
            "Revenue 1M",
            DocumentType::FinancialStatement,
        ))
        .await;

    assert_eq!(outcome.provider, ProviderKind::StaticFallback);
    let kinds: Vec<_> = outcome.attempts.iter().map(|a| a.error_kind).collect();
    assert_eq!(kinds, vec![Some("api"), Some("malformed_payload"), None]);
    assert!(outcome.attempts[0].reason.as_deref().unwrap().contains("503"));
}

#[tokio::test]
async fn sloppy_primary_output_is_normalized() {
    let server = MockServer::start();
    let mut sloppy = card_json(0);
    sloppy["overallScore"] = json!("87.6%");
    sloppy["innovationScore"] = json!(140);
    sloppy["improvementAreas"] = json!([
        {"area": "Team", "score": 30, "suggestion": "Hire a CFO.", "priority": "HIGH"},
        {"area": "", "score": 10, "suggestion": "dropped"},
        "not an object"
    ]);
    let fenced = format!("```json\n{sloppy}\n```");

    server.mock(|when, then| {
        when.method(POST).path(VERTEX_PATH);
        then.status(200).json_body(gemini_reply(&fenced));
    });

    let outcome = chain(
        vertex_config(&server),
        OpenAiConfig::default(),
        Duration::from_secs(5),
    )
    .run(&gauge_analysis::AnalysisRequest::new(
        "Plan",
        "text",
        DocumentType::BusinessPlan,
    ))
    .await;

    assert_eq!(outcome.provider, ProviderKind::PrimaryInference);
    assert_eq!(outcome.scorecard.overall_score, 88);
    assert_eq!(outcome.scorecard.innovation_score, 100);
    assert_eq!(outcome.scorecard.improvement_areas.len(), 1);
    assert!(outcome.scorecard.is_within_bounds());
}

#[tokio::test]
async fn nothing_configured_returns_static_for_document_type() {
    let service = AnalysisService::new(
        chain(
            VertexConfig::default(),
            OpenAiConfig::default(),
            Duration::from_secs(1),
        ),
        MemoryStore::new(),
    );
    let card = service
        .analyze_document("Survey", "TAM 10B", "Market-Analysis", USER)
        .await;
    assert_eq!(card, static_scorecard(DocumentType::MarketAnalysis));
    assert_eq!(
        service.chain().provider_kinds(),
        vec![ProviderKind::StaticFallback]
    );
}
