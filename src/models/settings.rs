//! Settings Models
//!
//! Application configuration stored in config.json, plus the API credentials
//! that only ever come from the environment.

use serde::{Deserialize, Serialize};

use content_cascade_core::ProxyConfig;
use content_cascade_llm::DEFAULT_MODELS;

use crate::services::fallback::KeywordStrategy;
use crate::utils::error::{AppError, AppResult};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the Tavily API key
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model identifiers, tried in order
    pub models: Vec<String>,
    /// Deadline for one model call, in seconds
    pub model_call_timeout_secs: u64,
    /// Stop the model chain on the first non-transient error
    pub short_circuit_non_transient: bool,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per completion
    pub max_output_tokens: u32,
    /// Gemini API host override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_base_url: Option<String>,
    /// Results requested per search
    pub search_max_results: u32,
    /// Deadline for one search call, in seconds
    pub search_timeout_secs: u64,
    /// Tavily API host override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tavily_base_url: Option<String>,
    /// How fallback keywords are selected
    pub keyword_strategy: KeywordStrategy,
    /// Number of fallback keywords
    pub keyword_limit: usize,
    /// Outbound proxy for both backends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            model_call_timeout_secs: 60,
            short_circuit_non_transient: true,
            temperature: 0.7,
            max_output_tokens: 8192,
            gemini_base_url: None,
            search_max_results: 5,
            search_timeout_secs: 15,
            tavily_base_url: None,
            keyword_strategy: KeywordStrategy::FirstSeen,
            keyword_limit: 10,
            proxy: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub models: Option<Vec<String>>,
    pub model_call_timeout_secs: Option<u64>,
    pub short_circuit_non_transient: Option<bool>,
    pub search_max_results: Option<u32>,
    pub keyword_strategy: Option<KeywordStrategy>,
    pub proxy: Option<ProxyConfig>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(models) = update.models {
            self.models = models;
        }
        if let Some(timeout) = update.model_call_timeout_secs {
            self.model_call_timeout_secs = timeout;
        }
        if let Some(short_circuit) = update.short_circuit_non_transient {
            self.short_circuit_non_transient = short_circuit;
        }
        if let Some(max_results) = update.search_max_results {
            self.search_max_results = max_results;
        }
        if let Some(strategy) = update.keyword_strategy {
            self.keyword_strategy = strategy;
        }
        if let Some(proxy) = update.proxy {
            self.proxy = Some(proxy);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.models.is_empty() {
            return Err("at least one model must be configured".to_string());
        }
        if self.models.iter().any(|m| m.trim().is_empty()) {
            return Err("model identifiers must not be blank".to_string());
        }
        if self.model_call_timeout_secs == 0 {
            return Err("model_call_timeout_secs must be greater than 0".to_string());
        }
        if self.search_timeout_secs == 0 {
            return Err("search_timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        if !(1..=20).contains(&self.search_max_results) {
            return Err(format!(
                "search_max_results must be between 1 and 20, got {}",
                self.search_max_results
            ));
        }
        if self.keyword_limit == 0 {
            return Err("keyword_limit must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// API keys read once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub tavily_api_key: String,
}

impl Credentials {
    /// Read both keys from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both keys through `lookup`; a missing or blank key is a
    /// configuration error naming the variable.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    AppError::config(format!(
                        "{} is not set. Export it or add it to a .env file.",
                        name
                    ))
                })
        };

        Ok(Self {
            gemini_api_key: require(GEMINI_API_KEY_VAR)?,
            tavily_api_key: require(TAVILY_API_KEY_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("tavily_api_key", &redact(&self.tavily_api_key))
            .finish()
    }
}

/// Show only the last four characters of a secret.
pub fn redact(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
