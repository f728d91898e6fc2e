//! Model Fallback Chain
//!
//! Sends a prompt to an ordered list of models and returns the first usable
//! completion. Transient failures (overload, unknown model, deadline, empty
//! completion) advance to the next model; any other failure stops the chain.
//! The caller always gets text back: either a completion, a formatted error,
//! or an offline notice that quotes the start of the prompt.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::provider::LlmProvider;
use crate::types::{LlmError, LlmRequestOptions, Message};

/// Model identifiers tried in order when nothing else is configured.
pub const DEFAULT_MODELS: [&str; 3] = ["gemini-2.5-flash", "gemini-2.0-pro", "gemini-2.0-flash"];

/// Default deadline for a single backend call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Number of prompt characters echoed in the offline notice.
pub const PROMPT_PREVIEW_CHARS: usize = 120;

/// Anything that turns a prompt into text without failing.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`. Never empty.
    async fn generate(&self, prompt: &str) -> String;
}

/// Why a model attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Backend overloaded or otherwise unavailable
    Unavailable,
    /// Model identifier unknown or retired
    ModelNotFound,
    /// Call exceeded its deadline
    Timeout,
    /// Call succeeded with no text
    EmptyResponse,
    /// Anything else: auth, quota, bad request, parse, network
    Error,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Unavailable => write!(f, "unavailable"),
            FailureReason::ModelNotFound => write!(f, "model_not_found"),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::EmptyResponse => write!(f, "empty_response"),
            FailureReason::Error => write!(f, "error"),
        }
    }
}

impl FailureReason {
    /// Check if this failure reason should move on to the next model
    pub fn should_fallback(&self) -> bool {
        !matches!(self, FailureReason::Error)
    }
}

impl From<&LlmError> for FailureReason {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::ModelNotFound { .. } => FailureReason::ModelNotFound,
            LlmError::Timeout { .. } => FailureReason::Timeout,
            LlmError::EmptyResponse { .. } => FailureReason::EmptyResponse,
            other if other.is_transient() => FailureReason::Unavailable,
            _ => FailureReason::Error,
        }
    }
}

/// Record of a single model attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAttempt {
    /// Model that was tried
    pub model: String,
    /// Whether this attempt produced text
    pub success: bool,
    /// Failure reason if failed
    pub failure_reason: Option<FailureReason>,
    /// Error message if failed
    pub error_message: Option<String>,
    /// Duration of the attempt in milliseconds
    pub duration_ms: u64,
    /// Timestamp when attempt started
    pub started_at: String,
}

impl ModelAttempt {
    fn success(model: &str, started_at: String, duration_ms: u64) -> Self {
        Self {
            model: model.to_string(),
            success: true,
            failure_reason: None,
            error_message: None,
            duration_ms,
            started_at,
        }
    }

    fn failure(model: &str, err: &LlmError, started_at: String, duration_ms: u64) -> Self {
        Self {
            model: model.to_string(),
            success: false,
            failure_reason: Some(FailureReason::from(err)),
            error_message: Some(err.to_string()),
            duration_ms,
            started_at,
        }
    }
}

impl std::fmt::Display for ModelAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.failure_reason {
            Some(reason) => write!(
                f,
                "{} failed ({}) at {} after {}ms",
                self.model, reason, self.started_at, self.duration_ms
            ),
            None => write!(
                f,
                "{} ok at {} after {}ms",
                self.model, self.started_at, self.duration_ms
            ),
        }
    }
}

/// Typed result of running a prompt through the chain.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// A model produced text.
    Generated {
        model: String,
        text: String,
        attempts: Vec<ModelAttempt>,
    },
    /// A model failed with a non-transient error and the chain stopped there.
    Rejected {
        model: String,
        error: LlmError,
        attempts: Vec<ModelAttempt>,
    },
    /// Every model failed transiently.
    Exhausted { attempts: Vec<ModelAttempt> },
}

impl GenerationOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, GenerationOutcome::Generated { .. })
    }

    pub fn attempts(&self) -> &[ModelAttempt] {
        match self {
            GenerationOutcome::Generated { attempts, .. }
            | GenerationOutcome::Rejected { attempts, .. }
            | GenerationOutcome::Exhausted { attempts } => attempts,
        }
    }

    /// Collapse into caller-facing text.
    ///
    /// `prompt` is only used to build the offline notice.
    pub fn into_text(self, prompt: &str) -> String {
        match self {
            GenerationOutcome::Generated { text, .. } => text,
            GenerationOutcome::Rejected { error, .. } => rejected_message(&error),
            GenerationOutcome::Exhausted { .. } => offline_message(prompt),
        }
    }
}

/// Text returned when a model rejects the request outright.
pub fn rejected_message(err: &LlmError) -> String {
    format!("[Gemini Error] {}", err)
}

/// Text returned when every model is unavailable.
pub fn offline_message(prompt: &str) -> String {
    let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    format!(
        "⚠ **Gemini servers are busy. Fallback activated.**\n\n\
         Prompt preview: {}...\n\n\
         - Please try again after a few seconds.\n\
         - This is offline fallback content.",
        preview
    )
}

/// Model client with substitution on transient failure.
#[derive(Clone)]
pub struct ModelFallbackClient {
    /// One provider per model, in priority order
    providers: Vec<Arc<dyn LlmProvider>>,
    call_timeout: Duration,
    short_circuit_non_transient: bool,
}

impl ModelFallbackClient {
    /// Create a chain over `providers`, tried in the given order.
    pub fn new(providers: Vec<Arc<dyn LlmProvider>>) -> Self {
        Self {
            providers,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            short_circuit_non_transient: true,
        }
    }

    /// Set the per-call deadline
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// When `false`, non-transient errors also advance to the next model
    /// instead of stopping the chain.
    pub fn with_short_circuit(mut self, short_circuit: bool) -> Self {
        self.short_circuit_non_transient = short_circuit;
        self
    }

    /// Model identifiers in the order they are tried
    pub fn models(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.model()).collect()
    }

    /// Primary provider, if any model is configured
    pub fn primary(&self) -> Option<Arc<dyn LlmProvider>> {
        self.providers.first().cloned()
    }

    async fn call(&self, provider: &dyn LlmProvider, prompt: &str) -> Result<String, LlmError> {
        let request = provider.send_message(
            vec![Message::user(prompt)],
            None,
            LlmRequestOptions::default(),
        );

        let response = tokio::time::timeout(self.call_timeout, request)
            .await
            .map_err(|_| LlmError::Timeout {
                seconds: self.call_timeout.as_secs(),
            })??;
        debug!(
            "Model {} used {} tokens",
            provider.model(),
            response.usage.total_tokens()
        );

        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| LlmError::EmptyResponse {
                model: provider.model().to_string(),
            })
    }

    /// Run the prompt through the chain and report what happened.
    pub async fn generate_outcome(&self, prompt: &str) -> GenerationOutcome {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let model = provider.model();
            debug!("Trying model {}", model);
            let started_at = chrono::Utc::now().to_rfc3339();
            let attempt_start = Instant::now();

            match self.call(provider.as_ref(), prompt).await {
                Ok(text) => {
                    let duration_ms = attempt_start.elapsed().as_millis() as u64;
                    info!("Model {} succeeded in {}ms", model, duration_ms);
                    attempts.push(ModelAttempt::success(model, started_at, duration_ms));
                    return GenerationOutcome::Generated {
                        model: model.to_string(),
                        text,
                        attempts,
                    };
                }
                Err(err) => {
                    let duration_ms = attempt_start.elapsed().as_millis() as u64;
                    let reason = FailureReason::from(&err);
                    warn!("Model {} failed: {} (reason: {})", model, err, reason);
                    attempts.push(ModelAttempt::failure(model, &err, started_at, duration_ms));

                    if !reason.should_fallback() && self.short_circuit_non_transient {
                        error!("Failure reason {} does not allow model substitution", reason);
                        return GenerationOutcome::Rejected {
                            model: model.to_string(),
                            error: err,
                            attempts,
                        };
                    }
                }
            }
        }

        error!(
            "All {} models in the chain failed; returning offline content",
            attempts.len()
        );
        GenerationOutcome::Exhausted { attempts }
    }
}

#[async_trait]
impl TextGenerator for ModelFallbackClient {
    async fn generate(&self, prompt: &str) -> String {
        let outcome = self.generate_outcome(prompt).await;
        if outcome.attempts().len() > 1 || !outcome.is_generated() {
            let trail: Vec<String> = outcome.attempts().iter().map(|a| a.to_string()).collect();
            info!("Model attempts: {}", trail.join("; "));
        }
        outcome.into_text(prompt)
    }
}
