// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Environment-driven application configuration

use std::env;

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Model service configuration
    pub llm: LlmConfig,
    /// Trending news configuration
    pub trending: TrendingConfig,
    /// Rate limit for the model-backed endpoints
    pub api_rate: RateLimitSettings,
    /// Rate limit for the scrape endpoint
    pub scrape_rate: RateLimitSettings,
    /// Capacity of each per-session history list
    pub history_max_items: usize,
    /// Upper bound on tracked sessions
    pub max_sessions: usize,
    /// Article download timeout in seconds
    pub scrape_timeout_secs: u64,
}

/// Model service configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the model service
    pub api_key: String,
    /// API base URL
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// One sliding-window rate limit
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub max_requests: usize,
    pub window_secs: u64,
}

/// Trending news configuration
#[derive(Debug, Clone)]
pub struct TrendingConfig {
    /// GNews API key; trending stays disabled without one
    pub api_key: Option<String>,
    /// Topic query
    pub query: String,
    /// ISO language filter
    pub language: String,
    /// ISO country filter
    pub country: String,
    /// Result cap per refresh
    pub max_results: usize,
    /// Refresh interval (and snapshot TTL) in seconds
    pub refresh_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            llm: LlmConfig {
                api_key: env::var("DEEPSEEK_API_KEY").unwrap_or_default(),
                api_base: env::var("DEEPSEEK_API_BASE")
                    .unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string()),
                model: env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
                timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60),
            },
            trending: TrendingConfig {
                api_key: env::var("GNEWS_API_KEY").ok().filter(|k| !k.is_empty()),
                query: env::var("TRENDING_QUERY").unwrap_or_else(|_| "K-pop".to_string()),
                language: env::var("TRENDING_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
                country: env::var("TRENDING_COUNTRY").unwrap_or_else(|_| "us".to_string()),
                max_results: parse_env("TRENDING_MAX_RESULTS", 10),
                refresh_secs: parse_env("TRENDING_REFRESH_SECS", 3600),
            },
            api_rate: RateLimitSettings {
                max_requests: parse_env("API_RATE_LIMIT", 10),
                window_secs: parse_env("API_RATE_WINDOW_SECS", 60),
            },
            scrape_rate: RateLimitSettings {
                max_requests: parse_env("SCRAPE_RATE_LIMIT", 5),
                window_secs: parse_env("SCRAPE_RATE_WINDOW_SECS", 60),
            },
            history_max_items: parse_env("HISTORY_MAX_ITEMS", 10),
            max_sessions: parse_env("MAX_SESSIONS", 1000),
            scrape_timeout_secs: parse_env("SCRAPE_TIMEOUT_SECS", 10),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.llm.api_key.is_empty() {
            return Err("DEEPSEEK_API_KEY environment variable is not set".to_string());
        }
        if self.llm.timeout_secs == 0 {
            return Err("LLM timeout must be greater than 0".to_string());
        }
        if self.api_rate.max_requests == 0 || self.scrape_rate.max_requests == 0 {
            return Err("Rate limits must be greater than 0".to_string());
        }
        if self.api_rate.window_secs == 0 || self.scrape_rate.window_secs == 0 {
            return Err("Rate limit windows must be greater than 0".to_string());
        }
        if self.history_max_items == 0 {
            return Err("History capacity must be greater than 0".to_string());
        }
        if self.trending.refresh_secs == 0 {
            return Err("Trending refresh interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            llm: LlmConfig {
                api_key: String::new(),
                api_base: "https://api.deepseek.com/v1".to_string(),
                model: "deepseek-chat".to_string(),
                timeout_secs: 60,
            },
            trending: TrendingConfig {
                api_key: None,
                query: "K-pop".to_string(),
                language: "en".to_string(),
                country: "us".to_string(),
                max_results: 10,
                refresh_secs: 3600,
            },
            api_rate: RateLimitSettings {
                max_requests: 10,
                window_secs: 60,
            },
            scrape_rate: RateLimitSettings {
                max_requests: 5,
                window_secs: 60,
            },
            history_max_items: 10,
            max_sessions: 1000,
            scrape_timeout_secs: 10,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
