//! Search Service
//!
//! Best-effort topic research. The `SearchProvider` trait is the backend
//! seam; `ResearchClient` wraps a provider and decides how failures surface:
//! `search` swallows them, `research` reports them as a typed outcome and
//! `try_search` propagates them.

mod tavily;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use tavily::{TavilyProvider, DEFAULT_TAVILY_BASE_URL};

/// One search hit, kept as the provider returned it.
pub type SearchRecord = serde_json::Map<String, serde_json::Value>;

/// Errors from search backends
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0} requires an API key")]
    MissingApiKey(String),

    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Search request failed: {0}")]
    Request(String),

    #[error("Search API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse search response: {0}")]
    Parse(String),
}

/// Trait for pluggable search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for display
    fn name(&self) -> &str;

    /// Execute a search query
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchRecord>, SearchError>;
}

/// Typed result of a research attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ResearchOutcome {
    /// The provider returned records, in relevance order
    Found(Vec<SearchRecord>),
    /// The provider answered with no records
    Empty,
    /// The provider failed; the reason is kept for diagnostics
    Failed(String),
}

impl ResearchOutcome {
    /// Records found, empty on failure
    pub fn into_records(self) -> Vec<SearchRecord> {
        match self {
            ResearchOutcome::Found(records) => records,
            ResearchOutcome::Empty | ResearchOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Join records into one text blob, one compact JSON object per line.
pub fn research_blob(records: &[SearchRecord]) -> String {
    records
        .iter()
        .map(|r| serde_json::Value::Object(r.clone()).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turn tabs and newlines into spaces and drop other control characters.
fn sanitize_query(query: &str) -> String {
    query
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Research client with pluggable provider
#[derive(Clone)]
pub struct ResearchClient {
    provider: Arc<dyn SearchProvider>,
    max_results: u32,
}

impl ResearchClient {
    pub fn new(provider: Arc<dyn SearchProvider>, max_results: u32) -> Self {
        Self {
            provider,
            max_results: max_results.max(1),
        }
    }

    /// Get the name of the underlying search provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Search and propagate any failure.
    pub async fn try_search(&self, topic: &str) -> Result<Vec<SearchRecord>, SearchError> {
        let query = sanitize_query(topic);
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        debug!("Searching {} for '{}'", self.provider.name(), query);
        self.provider.search(&query, self.max_results).await
    }

    /// Search and classify the result.
    pub async fn research(&self, topic: &str) -> ResearchOutcome {
        match self.try_search(topic).await {
            Ok(records) if records.is_empty() => {
                info!("No research results for '{}'", topic);
                ResearchOutcome::Empty
            }
            Ok(records) => {
                info!("{} research results for '{}'", records.len(), topic);
                ResearchOutcome::Found(records)
            }
            Err(e) => {
                warn!("Research via {} failed: {}", self.provider.name(), e);
                ResearchOutcome::Failed(e.to_string())
            }
        }
    }

    /// Search, returning an empty list on any failure.
    pub async fn search(&self, topic: &str) -> Vec<SearchRecord> {
        self.research(topic).await.into_records()
    }
}
