// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! News provider trait definition

use async_trait::async_trait;

use super::types::{NewsError, NewsItem};

/// Trait for implementing news aggregation providers
///
/// The trending service only depends on this trait, so providers can be
/// swapped or stacked without touching the cache or refresh logic.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch the current top articles for `query`.
    ///
    /// # Arguments
    /// * `query` - Topic query string (e.g., "K-pop")
    /// * `max_results` - Maximum number of articles to return
    async fn fetch_top(&self, query: &str, max_results: usize)
        -> Result<Vec<NewsItem>, NewsError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is usable (has an API key, etc.)
    fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProvider {
        available: bool,
    }

    #[async_trait]
    impl NewsProvider for MockProvider {
        async fn fetch_top(
            &self,
            query: &str,
            _max_results: usize,
        ) -> Result<Vec<NewsItem>, NewsError> {
            Ok(vec![NewsItem {
                title: format!("Top story for {}", query),
                url: "https://example.com".to_string(),
                published_date: None,
                source: "mock".to_string(),
                image: None,
            }])
        }

        fn name(&self) -> &'static str {
            "mock"
        }

        fn is_available(&self) -> bool {
            self.available
        }
    }

    #[tokio::test]
    async fn test_mock_provider_fetch() {
        let provider = MockProvider { available: true };
        let items = provider.fetch_top("K-pop", 10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].title.contains("K-pop"));
    }

    #[test]
    fn test_mock_provider_availability() {
        let available = MockProvider { available: true };
        let unavailable = MockProvider { available: false };

        assert!(available.is_available());
        assert!(!unavailable.is_available());
    }
}
