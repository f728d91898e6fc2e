//! Content Service Integration Tests
//!
//! End-to-end runs of `ContentService` with the real agent crew, model chain
//! and fallback pipeline over fake backends.

use std::sync::Arc;

use async_trait::async_trait;

use content_cascade::services::content::ContentService;
use content_cascade::services::orchestrator::{AgentCrew, ContentOrchestrator, OrchestrationOutput};
use content_cascade::services::search::ResearchClient;
use content_cascade::{AppError, AppResult, RunPath};
use content_cascade_core::{GenerationRequest, PipelineStage};
use content_cascade_llm::LlmError;

use crate::support::{overloaded, pipeline, FakeModel, FakeSearch};

/// Orchestrator that fails the way a dropped connection does.
struct DisconnectedCrew;

#[async_trait]
impl ContentOrchestrator for DisconnectedCrew {
    fn name(&self) -> &str {
        "disconnected"
    }

    async fn run(&self, _request: &GenerationRequest, _use_research: bool) -> AppResult<OrchestrationOutput> {
        Err(AppError::orchestration(
            "ConnectionError: failed to reach the crew backend",
        ))
    }
}

#[tokio::test]
async fn test_crew_connection_error_falls_back() {
    let primary = FakeModel::failing("gemini-2.5-flash", overloaded());
    let second = FakeModel::answering("gemini-2.0-pro");
    let search = FakeSearch::with_results(&["EV charging guide"]);
    let service = ContentService::new(
        Arc::new(DisconnectedCrew),
        pipeline(&[primary.clone(), second.clone()], search.clone()),
    );

    let outcome = service
        .create_content("electric cars", "blog post", "800 words", "casual", true)
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.path, RunPath::Fallback);
    assert!(outcome.error.as_deref().unwrap().contains("ConnectionError"));
    assert_eq!(
        outcome.pipeline.stage_names(),
        vec!["ResearchAgent", "WriterAgent", "EditorAgent", "SEOAgent"]
    );
    assert_eq!(
        outcome.pipeline.get_named("EditorAgent"),
        Some(outcome.final_output.as_str())
    );
    assert_eq!(
        outcome.final_output,
        "Polished article about electric vehicles from gemini-2.0-pro"
    );
    assert!(outcome
        .pipeline
        .get(PipelineStage::Research)
        .unwrap()
        .contains("EV charging guide"));
    assert_eq!(search.calls(), 1);

    // the draft prompt carries the request and the research
    let prompts = second.prompts();
    assert!(prompts[0].contains("Write a blog post on the topic: electric cars"));
    assert!(prompts[0].contains("Tone: casual"));
    assert!(prompts[0].contains("EV charging guide"));
    assert_eq!(primary.calls(), 2);
}

#[tokio::test]
async fn test_real_crew_failure_preserves_error() {
    let crew_model = FakeModel::failing(
        "gemini-2.5-flash",
        LlmError::NetworkError {
            message: "ConnectionError: connection refused".to_string(),
        },
    );
    let chain_model = FakeModel::answering("gemini-2.0-flash");
    let search = FakeSearch::with_results(&["EV market report"]);

    let crew = AgentCrew::new(crew_model.clone(), ResearchClient::new(search.clone(), 5));
    let service = ContentService::new(Arc::new(crew), pipeline(&[chain_model], search.clone()));

    let outcome = service
        .create_content("electric cars", "blog post", "800 words", "casual", true)
        .await;

    assert!(outcome.used_fallback());
    let error = outcome.error.unwrap();
    assert!(error.contains("ResearchAgent failed"));
    assert!(error.contains("ConnectionError"));
    assert_eq!(crew_model.calls(), 1);
    // crew searched once, fallback searched again
    assert_eq!(search.calls(), 2);
}

#[tokio::test]
async fn test_crew_success_is_orchestrated() {
    let crew_model = FakeModel::answering("gemini-2.5-flash");
    let search = FakeSearch::with_results(&["EV market report"]);
    let crew = AgentCrew::new(crew_model.clone(), ResearchClient::new(search.clone(), 5));
    let service = ContentService::new(
        Arc::new(crew),
        pipeline(&[FakeModel::answering("gemini-2.0-flash")], search),
    );

    let outcome = service
        .create_content("electric cars", "blog post", "800 words", "casual", true)
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.path, RunPath::Orchestrated);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.pipeline.len(), 4);
    assert_eq!(
        outcome.pipeline.get(PipelineStage::Editor),
        Some(outcome.final_output.as_str())
    );
    assert_eq!(crew_model.calls(), 4);
}

#[tokio::test]
async fn test_crew_without_research_skips_research_task() {
    let crew_model = FakeModel::answering("gemini-2.5-flash");
    let search = FakeSearch::with_results(&["unused"]);
    let crew = AgentCrew::new(crew_model.clone(), ResearchClient::new(search.clone(), 5));
    let service = ContentService::new(
        Arc::new(crew),
        pipeline(&[FakeModel::answering("gemini-2.0-flash")], search.clone()),
    );

    let outcome = service
        .create_content("electric cars", "blog post", "800 words", "casual", false)
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.path, RunPath::Orchestrated);
    assert_eq!(search.calls(), 0);
    assert_eq!(crew_model.calls(), 3);
    assert_eq!(
        outcome.pipeline.get(PipelineStage::Research),
        Some("Research disabled for this run")
    );
    assert!(crew_model
        .prompts()
        .iter()
        .all(|prompt| !prompt.starts_with("Task: Research the topic")));
}

#[tokio::test]
async fn test_search_outage_still_produces_content() {
    let model = FakeModel::answering("gemini-2.5-flash");
    let search = FakeSearch::broken();
    let service = ContentService::new(Arc::new(DisconnectedCrew), pipeline(&[model.clone()], search.clone()));

    let outcome = service
        .create_content("electric cars", "blog post", "800 words", "casual", true)
        .await;

    assert_eq!(search.calls(), 1);
    assert_eq!(
        outcome.pipeline.get(PipelineStage::Research),
        Some("No research available")
    );
    assert_eq!(model.calls(), 2);
    assert!(!outcome.final_output.is_empty());
}

#[tokio::test]
async fn test_research_disabled_never_searches() {
    let search = FakeSearch::with_results(&["unused"]);
    let crew = AgentCrew::new(
        FakeModel::failing("gemini-2.5-flash", overloaded()),
        ResearchClient::new(search.clone(), 5),
    );
    let service = ContentService::new(
        Arc::new(crew),
        pipeline(&[FakeModel::answering("gemini-2.0-flash")], search.clone()),
    );

    let outcome = service
        .create_content("electric cars", "blog post", "800 words", "casual", false)
        .await;

    assert!(outcome.used_fallback());
    assert_eq!(search.calls(), 0);
    assert_eq!(
        outcome.pipeline.get(PipelineStage::Research),
        Some("Research disabled for this run")
    );
}

#[tokio::test]
async fn test_everything_down_still_returns_text() {
    let models = [
        FakeModel::failing("gemini-2.5-flash", overloaded()),
        FakeModel::failing("gemini-2.0-pro", overloaded()),
        FakeModel::failing("gemini-2.0-flash", overloaded()),
    ];
    let service = ContentService::new(
        Arc::new(DisconnectedCrew),
        pipeline(&models, FakeSearch::broken()),
    );

    let outcome = service
        .create_content("electric cars", "blog post", "800 words", "casual", true)
        .await;

    assert!(outcome
        .final_output
        .starts_with("⚠ **Gemini servers are busy"));
    assert!(outcome
        .final_output
        .contains("Prompt preview: Polish and refine this content:"));
    assert!(!outcome.pipeline.get(PipelineStage::Seo).unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_topic_is_reported_not_raised() {
    let service = ContentService::new(
        Arc::new(DisconnectedCrew),
        pipeline(&[FakeModel::answering("gemini-2.5-flash")], FakeSearch::broken()),
    );

    let outcome = service.create_content("", "", "", "", true).await;

    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("topic must not be empty"));
    assert!(!outcome.final_output.is_empty());
    assert_eq!(outcome.pipeline.len(), 4);
}
