//! Model Chain Integration Tests
//!
//! Drives `ModelFallbackClient` through the `TextGenerator` seam the
//! fallback pipeline uses.

use std::time::Duration;

use content_cascade_llm::{FailureReason, GenerationOutcome, LlmError, TextGenerator};

use crate::support::{chain, overloaded, FakeModel};

#[tokio::test]
async fn test_transient_primary_is_substituted() {
    let primary = FakeModel::failing("gemini-2.5-flash", overloaded());
    let second = FakeModel::answering("gemini-2.0-pro");
    let third = FakeModel::answering("gemini-2.0-flash");

    let text = chain(&[primary.clone(), second.clone(), third.clone()])
        .generate("Write about tides")
        .await;

    assert_eq!(text, "Draft article about electric vehicles from gemini-2.0-pro");
    assert_eq!(primary.calls(), 1);
    assert_eq!(second.calls(), 1);
    assert_eq!(third.calls(), 0);
}

#[tokio::test]
async fn test_unknown_model_is_substituted() {
    let retired = FakeModel::failing(
        "gemini-2.0-pro",
        LlmError::ModelNotFound {
            model: "gemini-2.0-pro".to_string(),
        },
    );
    let fallback = FakeModel::answering("gemini-2.0-flash");

    let outcome = chain(&[retired, fallback]).generate_outcome("hello").await;

    assert!(outcome.is_generated());
    assert_eq!(outcome.attempts().len(), 2);
    assert_eq!(
        outcome.attempts()[0].failure_reason,
        Some(FailureReason::ModelNotFound)
    );
}

#[tokio::test]
async fn test_all_models_busy_returns_offline_notice() {
    let models = [
        FakeModel::failing("gemini-2.5-flash", overloaded()),
        FakeModel::failing(
            "gemini-2.0-pro",
            LlmError::ServerError {
                message: "UNAVAILABLE".to_string(),
                status: None,
            },
        ),
        FakeModel::failing("gemini-2.0-flash", overloaded()),
    ];
    let prompt = "x".repeat(300);

    let text = chain(&models).generate(&prompt).await;

    assert!(text.starts_with("⚠ **Gemini servers are busy"));
    assert!(text.contains(&format!("Prompt preview: {}...", "x".repeat(120))));
    assert!(!text.contains(&"x".repeat(121)));
    assert!(models.iter().all(|m| m.calls() == 1));
}

#[tokio::test]
async fn test_hard_failure_stops_chain() {
    let primary = FakeModel::failing(
        "gemini-2.5-flash",
        LlmError::AuthenticationFailed {
            message: "API key not valid".to_string(),
        },
    );
    let second = FakeModel::answering("gemini-2.0-pro");

    let client = chain(&[primary, second.clone()]);
    let text = client.generate("hello").await;

    assert_eq!(text, "[Gemini Error] Authentication failed: API key not valid");
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn test_relaxed_chain_continues_past_hard_failure() {
    let primary = FakeModel::failing(
        "gemini-2.5-flash",
        LlmError::RateLimited {
            message: "quota".to_string(),
            retry_after: None,
        },
    );
    let second = FakeModel::answering("gemini-2.0-pro");

    let outcome = chain(&[primary, second.clone()])
        .with_short_circuit(false)
        .generate_outcome("hello")
        .await;

    match outcome {
        GenerationOutcome::Generated { model, .. } => assert_eq!(model, "gemini-2.0-pro"),
        other => panic!("expected a generated outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_model_list_goes_offline() {
    let text = chain(&[])
        .with_call_timeout(Duration::from_secs(1))
        .generate("anything")
        .await;
    assert!(text.contains("Prompt preview: anything..."));
}
