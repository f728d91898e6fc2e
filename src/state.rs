//! Application Context
//!
//! Wires configuration and credentials into the services a run needs.
//! Built once per process; everything inside is read-only afterwards.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use content_cascade_llm::{
    build_http_client, GeminiProvider, LlmProvider, LlmResult, ModelFallbackClient, ProviderConfig,
};

use crate::models::settings::{AppConfig, Credentials};
use crate::services::content::ContentService;
use crate::services::fallback::FallbackPipeline;
use crate::services::orchestrator::AgentCrew;
use crate::services::search::{ResearchClient, TavilyProvider};
use crate::utils::error::{AppError, AppResult};

/// Services shared by every run
pub struct AppContext {
    config: AppConfig,
    /// One provider per configured model, in chain order
    providers: Vec<Arc<dyn LlmProvider>>,
    content: ContentService,
}

impl AppContext {
    /// Build all services from validated settings and credentials.
    pub fn new(config: &AppConfig, creds: &Credentials) -> AppResult<Self> {
        config.validate().map_err(AppError::validation)?;

        let call_timeout = Duration::from_secs(config.model_call_timeout_secs);
        let gemini_http = build_http_client(config.proxy.as_ref(), Some(call_timeout))?;
        let base = ProviderConfig {
            api_key: Some(creds.gemini_api_key.clone()),
            base_url: config.gemini_base_url.clone(),
            model: config.models[0].clone(),
            max_tokens: config.max_output_tokens,
            temperature: config.temperature,
            proxy: config.proxy.clone(),
        };
        let providers: Vec<Arc<dyn LlmProvider>> = config
            .models
            .iter()
            .map(|model| {
                Arc::new(
                    GeminiProvider::new(base.for_model(model.as_str()), gemini_http.clone())
                        .with_timeout(call_timeout),
                ) as Arc<dyn LlmProvider>
            })
            .collect();

        let chain = ModelFallbackClient::new(providers.clone())
            .with_call_timeout(call_timeout)
            .with_short_circuit(config.short_circuit_non_transient);

        let search_http = build_http_client(
            config.proxy.as_ref(),
            Some(Duration::from_secs(config.search_timeout_secs)),
        )?;
        let tavily = TavilyProvider::new(
            search_http,
            creds.tavily_api_key.clone(),
            config.tavily_base_url.as_deref(),
        )?;
        let research = ResearchClient::new(Arc::new(tavily), config.search_max_results);

        info!(
            "Context ready: models [{}], search via {}",
            chain.models().join(", "),
            research.provider_name()
        );
        debug!("Model call timeout {}s", config.model_call_timeout_secs);

        let primary = chain
            .primary()
            .ok_or_else(|| AppError::config("at least one model must be configured"))?;
        let crew = AgentCrew::new(primary, research.clone());
        let fallback = FallbackPipeline::new(Arc::new(chain.clone()), research)
            .with_keywords(config.keyword_strategy, config.keyword_limit);

        Ok(Self {
            config: config.clone(),
            providers,
            content: ContentService::new(Arc::new(crew), fallback),
        })
    }

    /// The content entry point
    pub fn content(&self) -> &ContentService {
        &self.content
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Check every configured model, in chain order.
    pub async fn check_models(&self) -> Vec<(String, LlmResult<()>)> {
        let mut results = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let result = provider.health_check().await;
            debug!("Health check for {}: {:?}", provider.model(), result);
            results.push((provider.model().to_string(), result));
        }
        results
    }
}
