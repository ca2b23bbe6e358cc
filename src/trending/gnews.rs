// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! GNews top-headlines provider
//!
//! Implements news aggregation against the GNews REST API. The free tier
//! is enough for an hourly trending refresh.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::provider::NewsProvider;
use super::types::{NewsError, NewsItem};

const GNEWS_API_URL: &str = "https://gnews.io/api/v4/top-headlines";

const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// GNews API provider
pub struct GNewsProvider {
    api_key: String,
    language: String,
    country: String,
    client: Client,
}

impl GNewsProvider {
    /// Create a new GNews provider
    ///
    /// # Arguments
    /// * `api_key` - GNews API key; an empty key leaves the provider unavailable
    /// * `language` - ISO language filter (e.g., "en")
    /// * `country` - ISO country filter (e.g., "us")
    pub fn new(api_key: String, language: String, country: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            language,
            country,
            client,
        }
    }
}

#[async_trait]
impl NewsProvider for GNewsProvider {
    async fn fetch_top(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<NewsItem>, NewsError> {
        if !self.is_available() {
            return Err(NewsError::NoApiKey {
                provider: "gnews".to_string(),
            });
        }

        let response = self
            .client
            .get(GNEWS_API_URL)
            .query(&[
                ("q", query),
                ("lang", &self.language),
                ("country", &self.country),
                ("max", &max_results.min(100).to_string()),
                ("apikey", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NewsError::Timeout {
                        timeout_ms: REQUEST_TIMEOUT_MS,
                    }
                } else {
                    NewsError::Api {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(NewsError::RateLimited {
                retry_after_secs: 60,
            });
        }

        if status == 401 || status == 403 {
            return Err(NewsError::NoApiKey {
                provider: "gnews".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NewsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: GNewsResponse = response.json().await.map_err(|e| NewsError::Api {
            status: 0,
            message: format!("JSON parse error: {}", e),
        })?;

        Ok(data
            .articles
            .into_iter()
            .map(|a| NewsItem {
                title: a.title,
                url: a.url,
                published_date: a.published_at,
                source: a.source.name,
                image: a.image,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "gnews"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, serde::Deserialize)]
struct GNewsResponse {
    articles: Vec<GNewsArticle>,
}

#[derive(Debug, serde::Deserialize)]
struct GNewsArticle {
    title: String,
    url: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<String>,
    source: GNewsSource,
}

#[derive(Debug, serde::Deserialize)]
struct GNewsSource {
    name: String,
}
