// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for trending news aggregation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single trending news item from a news aggregation provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article headline
    pub title: String,
    /// Article URL
    pub url: String,
    /// Published date if the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// Publisher name (e.g., "Soompi")
    pub source: String,
    /// Cover image URL if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A point-in-time view of the trending news listing.
#[derive(Debug, Clone, Serialize)]
pub struct TrendingSnapshot {
    pub news: Vec<NewsItem>,
    pub last_updated: DateTime<Utc>,
}

/// Errors that can occur while fetching trending news
#[derive(Debug, Error)]
pub enum NewsError {
    /// Rate limited by the news provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// API error from the news provider
    #[error("News API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Request timed out
    #[error("News request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// No API key configured for the provider
    #[error("No API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing an API key
        provider: String,
    },

    /// Provider could not be used at all
    #[error("News provider unavailable: {provider}")]
    ProviderUnavailable {
        /// Name of the unavailable provider
        provider: String,
    },
}
