//! Tavily search provider

use async_trait::async_trait;

use super::{SearchError, SearchProvider, SearchRecord};

/// Default Tavily API host
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// Tavily search provider (requires API key)
pub struct TavilyProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilyProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: Option<&str>,
    ) -> Result<Self, SearchError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingApiKey("Tavily".to_string()));
        }
        Ok(Self {
            client,
            api_key,
            base_url: base_url
                .unwrap_or(DEFAULT_TAVILY_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

/// Pull the `results` array out of a Tavily response body.
fn parse_results(data: &serde_json::Value) -> Result<Vec<SearchRecord>, SearchError> {
    let results = data
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| SearchError::Parse("missing 'results' array".to_string()))?;

    Ok(results
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect())
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "Tavily"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchRecord>, SearchError> {
        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
            "include_answer": false,
        });

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                body: err_body,
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        parse_results(&data)
    }
}
