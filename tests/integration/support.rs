//! Shared mocks for the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use content_cascade::services::fallback::FallbackPipeline;
use content_cascade::services::search::{ResearchClient, SearchError, SearchProvider, SearchRecord};
use content_cascade_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ModelFallbackClient,
    ProviderConfig, StopReason, UsageStats,
};

/// Provider bound to one model that either answers or fails every call.
pub struct FakeModel {
    config: ProviderConfig,
    failure: Option<LlmError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn answering(model: &str) -> Arc<Self> {
        Arc::new(Self::build(model, None))
    }

    pub fn failing(model: &str, error: LlmError) -> Arc<Self> {
        Arc::new(Self::build(model, Some(error)))
    }

    fn build(model: &str, failure: Option<LlmError>) -> Self {
        Self {
            config: ProviderConfig {
                model: model.to_string(),
                ..Default::default()
            },
            failure,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeModel {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        _system: Option<String>,
        _request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt.clone());

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let text = if prompt.starts_with("Polish and refine") {
            format!("Polished article about electric vehicles from {}", self.config.model)
        } else {
            format!("Draft article about electric vehicles from {}", self.config.model)
        };
        Ok(LlmResponse {
            content: Some(text),
            stop_reason: StopReason::EndTurn,
            usage: UsageStats::default(),
            model: self.config.model.clone(),
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// 503 overload error as Gemini reports it.
pub fn overloaded() -> LlmError {
    LlmError::ServerError {
        message: "The model is overloaded. Please try again later.".to_string(),
        status: Some(503),
    }
}

/// Search backend with a fixed answer that counts its calls.
pub struct FakeSearch {
    records: Option<Vec<SearchRecord>>,
    calls: AtomicUsize,
}

impl FakeSearch {
    pub fn with_results(titles: &[&str]) -> Arc<Self> {
        let records = titles
            .iter()
            .map(|title| {
                let mut record = SearchRecord::new();
                record.insert("title".to_string(), serde_json::json!(title));
                record.insert("url".to_string(), serde_json::json!("https://example.com"));
                record
            })
            .collect();
        Arc::new(Self {
            records: Some(records),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            records: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    fn name(&self) -> &str {
        "fake-search"
    }

    async fn search(&self, _query: &str, _max_results: u32) -> Result<Vec<SearchRecord>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records.clone().ok_or(SearchError::Api {
            status: 432,
            body: "usage limit exceeded".to_string(),
        })
    }
}

/// Model chain over the given fakes, in order.
pub fn chain(models: &[Arc<FakeModel>]) -> ModelFallbackClient {
    ModelFallbackClient::new(
        models
            .iter()
            .map(|m| m.clone() as Arc<dyn LlmProvider>)
            .collect(),
    )
}

/// Fallback pipeline over a model chain and a search fake.
pub fn pipeline(models: &[Arc<FakeModel>], search: Arc<FakeSearch>) -> FallbackPipeline {
    FallbackPipeline::new(Arc::new(chain(models)), ResearchClient::new(search, 5))
}
