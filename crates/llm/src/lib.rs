//! Content Cascade LLM
//!
//! Provides a unified interface for the text-generation backend:
//! - `LlmProvider` trait and shared request/response/error types
//! - Google Gemini provider
//! - Model fallback chain that substitutes models on transient failure
//!
//! Also includes the HTTP client factory shared with the search client.

pub mod gemini;
pub mod http_client;
pub mod model_chain;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use model_chain::{
    offline_message, rejected_message, FailureReason, GenerationOutcome, ModelAttempt,
    ModelFallbackClient, TextGenerator, DEFAULT_CALL_TIMEOUT, DEFAULT_MODELS,
};
pub use provider::LlmProvider;
pub use types::*;
