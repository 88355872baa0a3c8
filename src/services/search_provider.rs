use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;

use crate::{
    config::SearchConfig,
    errors::{AppError, AppResult},
    models::domain::SearchResult,
    services::content_provider::{api_key_header, API_KEY_HEADER},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, num_results: u8) -> AppResult<Vec<SearchResult>>;
}

#[derive(Debug, Default, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CustomSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(rename = "displayLink", default)]
    display_link: String,
}

impl From<CustomSearchItem> for SearchResult {
    fn from(item: CustomSearchItem) -> Self {
        SearchResult {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
            source: item.display_link,
        }
    }
}

/// Client for the Google Custom Search JSON API.
pub struct GoogleSearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl GoogleSearchClient {
    pub fn new(http: reqwest::Client, config: SearchConfig) -> Self {
        Self { http, config }
    }

    fn credentials(&self) -> AppResult<(&SecretString, &str)> {
        match (&self.config.api_key, &self.config.engine_id) {
            (Some(key), Some(engine_id)) => Ok((key, engine_id.as_str())),
            _ => Err(AppError::ProviderError(
                "Search credentials are not configured".to_string(),
            )),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/customsearch/v1",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request(
        &self,
        api_key: &SecretString,
        engine_id: &str,
        query: &str,
        num_results: u8,
    ) -> AppResult<reqwest::Request> {
        let num = num_results.to_string();
        let request = self
            .http
            .get(self.endpoint())
            .header(API_KEY_HEADER, api_key_header(api_key)?)
            .query(&[("cx", engine_id), ("q", query), ("num", num.as_str())])
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    async fn search(&self, query: &str, num_results: u8) -> AppResult<Vec<SearchResult>> {
        let (api_key, engine_id) = self.credentials()?;
        let request = self.build_request(api_key, engine_id, query, num_results)?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderError(format!(
                "Search API error {}: {}",
                status, body
            )));
        }

        let body: CustomSearchResponse = response.json().await?;
        Ok(body.items.into_iter().map(SearchResult::from).collect())
    }
}
