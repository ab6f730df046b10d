use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ProberConfig;
use crate::domain::model::Query;
use crate::domain::ports::SearchClient;
use crate::utils::error::{ProberError, Result};

/// Thin reqwest wrapper around the `_search` endpoint. One client serves
/// every query; reqwest pools connections per host.
#[derive(Debug, Clone)]
pub struct EsSearchClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EsSearchClient {
    pub fn from_config(config: &ProberConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(config.request_timeout.max(1.0)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn search_url(&self, query: &Query) -> String {
        format!("{}/{}/_search", self.base_url, query.path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(reqwest::header::AUTHORIZATION, format!("ApiKey {}", key)),
            None => request,
        }
    }

    /// Hits the cluster root endpoint; used by `doctor`.
    pub async fn cluster_info(&self) -> Result<serde_json::Value> {
        let request = self.authorize(self.client.get(&self.base_url));
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProberError::SearchError {
                query: "cluster-info".to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SearchClient for EsSearchClient {
    async fn search(&self, query: &Query) -> Result<serde_json::Value> {
        let url = self.search_url(query);
        tracing::debug!("POST {}", url);

        let request = self.authorize(self.client.post(&url).json(&query.body));
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("Search response status: {}", status);
        if !status.is_success() {
            return Err(ProberError::SearchError {
                query: query.name.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
