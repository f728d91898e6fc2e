//! LLM Provider Trait
//!
//! Defines the common interface for text-generation backends.

use async_trait::async_trait;
use serde::Deserialize;

use super::types::{LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig};

/// Trait that every model backend must implement.
///
/// A provider is bound to one model identifier; the model fallback client
/// holds one provider per identifier in its chain.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the model this provider calls.
    fn model(&self) -> &str;

    /// Send a message and get a complete response.
    ///
    /// # Arguments
    /// * `messages` - Conversation history
    /// * `system` - Optional system instruction
    /// * `request_options` - Per-request overrides
    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse>;

    /// Check if the model is reachable with the configured key.
    async fn health_check(&self) -> LlmResult<()>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Google-style error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Parse an HTTP error status and body into an `LlmError`.
///
/// The body's status string wins over the HTTP code when it names overload
/// (`UNAVAILABLE`) or a missing model (`NOT_FOUND`).
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    let (message, api_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.to_string(), String::new()),
    };

    match (status, api_status.as_str()) {
        (_, "UNAVAILABLE") | (503, _) => LlmError::ServerError {
            message: format!("{}: {} (UNAVAILABLE)", provider, message),
            status: Some(503),
        },
        (_, "NOT_FOUND") | (404, _) => LlmError::ModelNotFound { model: message },
        (401, _) | (_, "UNAUTHENTICATED") => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        (403, _) | (_, "PERMISSION_DENIED") => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        (429, _) | (_, "RESOURCE_EXHAUSTED") => LlmError::RateLimited {
            message,
            retry_after: None,
        },
        (400, _) => LlmError::InvalidRequest { message },
        (500..=599, _) => LlmError::ServerError {
            message,
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, message),
        },
    }
}
