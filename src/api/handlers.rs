// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::trending::NewsItem;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteResponse {
    pub success: bool,
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub text: String,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialResponse {
    pub success: bool,
    pub headlines: Vec<String>,
    pub captions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingResponse {
    pub news: Vec<NewsItem>,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl RewriteRequest {
    pub fn validate(&self) -> Result<(), crate::api::ApiError> {
        if self.text.trim().is_empty() {
            return Err(crate::api::ApiError::Validation(
                "No text provided for rewriting".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_request_optional_fields_default() {
        let req: RewriteRequest = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(req.text, "hello");
        assert!(req.url.is_empty());
        assert!(req.title.is_empty());
    }

    #[test]
    fn test_rewrite_request_validation_rejects_empty_text() {
        let req: RewriteRequest = serde_json::from_str(r#"{"text":"  "}"#).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "No text provided for rewriting");
    }

    #[test]
    fn test_rewrite_request_validation_accepts_text() {
        let req: RewriteRequest =
            serde_json::from_str(r#"{"text":"A real article body","url":"https://x","title":"t"}"#)
                .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_scrape_request_missing_url_defaults_empty() {
        let req: ScrapeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_empty());
    }

    #[test]
    fn test_history_response_serialization() {
        let response = HistoryResponse { history: vec![] };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"history":[]}"#);
    }
}
