//! Search service client implementations

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::ports::{SearchClient, SearchHit, SearchQuery};
use crate::error::SearchError;

/// HTTP client for the search service
pub struct HttpSearchClient {
    http: Client,
    base_url: String,
}

impl HttpSearchClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, query: &SearchQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchHit>,
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, SearchError> {
        let response = self.http.get(self.url(query)).send().await?;
        let status = response.status();

        if status.is_success() {
            let body: SearchResponse = response
                .json()
                .await
                .map_err(|e| SearchError::Deserialization(e.to_string()))?;
            Ok(body.result)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SearchError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Search client used when no search service is configured
pub struct NoopSearchClient;

#[async_trait]
impl SearchClient for NoopSearchClient {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchHit>, SearchError> {
        Ok(Vec::new())
    }
}

/// Either the HTTP client or the no-op client, chosen from configuration
pub enum ConfiguredSearchClient {
    Http(HttpSearchClient),
    Noop(NoopSearchClient),
}

impl ConfiguredSearchClient {
    pub fn from_url(search_url: Option<String>) -> Self {
        match search_url {
            Some(url) => ConfiguredSearchClient::Http(HttpSearchClient::new(url)),
            None => ConfiguredSearchClient::Noop(NoopSearchClient),
        }
    }
}

#[async_trait]
impl SearchClient for ConfiguredSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, SearchError> {
        match self {
            ConfiguredSearchClient::Http(client) => client.search(query).await,
            ConfiguredSearchClient::Noop(client) => client.search(query).await,
        }
    }
}
