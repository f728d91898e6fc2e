//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's Gemini
//! `generateContent` REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, MessageRole, ProviderConfig,
    StopReason, UsageStats, DEFAULT_GEMINI_BASE_URL,
};
use crate::http_client::map_transport_error;

/// Gemini provider bound to a single model
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
    /// Deadline the shared client enforces, reported on timeout
    timeout: Option<Duration>,
}

impl GeminiProvider {
    /// Create a provider on a (possibly shared) HTTP client.
    pub fn new(config: ProviderConfig, client: reqwest::Client) -> Self {
        Self {
            config,
            client,
            timeout: None,
        }
    }

    /// Record the whole-request timeout the client was built with.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE_URL)
            .trim_end_matches('/')
    }

    fn endpoint(&self, suffix: &str) -> LlmResult<Url> {
        let raw = format!("{}/v1beta/models/{}{}", self.base_url(), self.config.model, suffix);
        Url::parse(&raw).map_err(|e| LlmError::InvalidRequest {
            message: format!("invalid Gemini endpoint {}: {}", raw, e),
        })
    }

    fn api_key(&self) -> LlmResult<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| missing_api_key_error("gemini"))
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        messages: &[Message],
        system: Option<&str>,
        request_options: &LlmRequestOptions,
    ) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{ "text": msg.content }]
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature": request_options
                    .temperature_override
                    .unwrap_or(self.config.temperature),
                "maxOutputTokens": request_options
                    .max_tokens_override
                    .unwrap_or(self.config.max_tokens),
            }
        });

        if let Some(sys) = system.filter(|s| !s.trim().is_empty()) {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": sys }]
            });
        }

        body
    }

    /// Parse a response from the Gemini API
    fn parse_response(&self, response: GeminiResponse) -> LlmResponse {
        let candidate = response.candidates.into_iter().next();

        let (content, stop_reason) = match candidate {
            Some(candidate) => {
                let text: String = candidate
                    .content
                    .map(|c| {
                        c.parts
                            .into_iter()
                            .filter_map(|p| p.text)
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .unwrap_or_default();
                let stop_reason = candidate
                    .finish_reason
                    .as_deref()
                    .map(StopReason::from)
                    .unwrap_or(StopReason::EndTurn);
                ((!text.is_empty()).then_some(text), stop_reason)
            }
            None => {
                let reason = response
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .map(|r| StopReason::from(r.as_str()))
                    .unwrap_or(StopReason::EndTurn);
                (None, reason)
            }
        };

        let usage = response
            .usage_metadata
            .map(|u| UsageStats {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                thinking_tokens: u.thoughts_token_count,
            })
            .unwrap_or_default();

        LlmResponse {
            content,
            stop_reason,
            usage,
            model: response
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let api_key = self.api_key()?;
        let url = self.endpoint(":generateContent")?;
        let body = self.build_request_body(&messages, system.as_deref(), &request_options);

        debug!("POST generateContent model={}", self.config.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        Ok(self.parse_response(gemini_response))
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self.api_key()?;
        let url = self.endpoint("")?;

        let response = self
            .client
            .get(url)
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status().as_u16();
        if status == 200 {
            return Ok(());
        }
        let body_text = response.text().await.unwrap_or_default();
        Err(parse_http_error(status, &body_text, "gemini"))
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    model_version: Option<String>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    thoughts_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}
