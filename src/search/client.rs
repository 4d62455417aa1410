//! Search service client.
//!
//! # Responsibilities
//! - Abstract the settings calls the configurator needs behind `SearchService`
//! - Talk to Meilisearch over its REST settings endpoints
//! - Map transport failures and non-2xx answers to `SearchError`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use thiserror::Error;
use url::Url;

use crate::config::SearchConfig;
use crate::observability::metrics;

/// Errors returned by the search service.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Base URL or endpoint could not be built.
    #[error("invalid search url: {0}")]
    InvalidUrl(String),

    /// API key is not a valid header value.
    #[error("invalid search api key")]
    InvalidApiKey,

    /// Connection, timeout or decoding failure.
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("search service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// One category of index settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsCategory {
    Filterable,
    Searchable,
    Sortable,
    RankingRules,
}

impl SettingsCategory {
    /// Path segment under `/indexes/{uid}/settings/`.
    pub fn path(self) -> &'static str {
        match self {
            SettingsCategory::Filterable => "filterable-attributes",
            SettingsCategory::Searchable => "searchable-attributes",
            SettingsCategory::Sortable => "sortable-attributes",
            SettingsCategory::RankingRules => "ranking-rules",
        }
    }
}

/// Settings operations on a search index.
///
/// Each call replaces the whole list for its category, so repeating a call
/// with the same values leaves the index unchanged.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn update_filterable_attributes(
        &self,
        index: &str,
        attributes: &[String],
    ) -> Result<(), SearchError>;

    async fn update_searchable_attributes(
        &self,
        index: &str,
        attributes: &[String],
    ) -> Result<(), SearchError>;

    async fn update_sortable_attributes(
        &self,
        index: &str,
        attributes: &[String],
    ) -> Result<(), SearchError>;

    async fn update_ranking_rules(&self, index: &str, rules: &[String]) -> Result<(), SearchError>;
}

/// Meilisearch REST client.
#[derive(Clone)]
pub struct MeiliClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MeiliClient {
    /// Build a client from configuration. No request is made here.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let mut raw = config.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url =
            Url::parse(&raw).map_err(|e| SearchError::InvalidUrl(format!("{}: {}", config.url, e)))?;

        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let value = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| SearchError::InvalidApiKey)?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn put_setting(
        &self,
        index: &str,
        category: SettingsCategory,
        values: &[String],
    ) -> Result<(), SearchError> {
        let endpoint = self
            .base_url
            .join(&format!("indexes/{}/settings/{}", index, category.path()))
            .map_err(|e| SearchError::InvalidUrl(e.to_string()))?;

        let response = self.http.put(endpoint).json(values).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            metrics::record_search_update(category.path(), false);
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Meilisearch enqueues settings changes and answers with a task summary.
        let task_uid = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("taskUid").and_then(|uid| uid.as_u64()));

        metrics::record_search_update(category.path(), true);
        tracing::debug!(
            index = %index,
            setting = category.path(),
            task_uid = ?task_uid,
            "Index settings update enqueued"
        );
        Ok(())
    }
}

#[async_trait]
impl SearchService for MeiliClient {
    async fn update_filterable_attributes(
        &self,
        index: &str,
        attributes: &[String],
    ) -> Result<(), SearchError> {
        self.put_setting(index, SettingsCategory::Filterable, attributes).await
    }

    async fn update_searchable_attributes(
        &self,
        index: &str,
        attributes: &[String],
    ) -> Result<(), SearchError> {
        self.put_setting(index, SettingsCategory::Searchable, attributes).await
    }

    async fn update_sortable_attributes(
        &self,
        index: &str,
        attributes: &[String],
    ) -> Result<(), SearchError> {
        self.put_setting(index, SettingsCategory::Sortable, attributes).await
    }

    async fn update_ranking_rules(&self, index: &str, rules: &[String]) -> Result<(), SearchError> {
        self.put_setting(index, SettingsCategory::RankingRules, rules).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let mut config = SearchConfig::default();
        config.url = "http://localhost:7700/meili".to_string();
        let client = MeiliClient::new(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:7700/meili/");

        let endpoint = client.base_url().join("indexes/media_DK/settings/ranking-rules").unwrap();
        assert_eq!(
            endpoint.as_str(),
            "http://localhost:7700/meili/indexes/media_DK/settings/ranking-rules"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = SearchConfig::default();
        config.url = "not a url".to_string();
        assert!(matches!(MeiliClient::new(&config), Err(SearchError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let mut config = SearchConfig::default();
        config.api_key = "bad\nkey".to_string();
        assert!(matches!(MeiliClient::new(&config), Err(SearchError::InvalidApiKey)));
    }
}
