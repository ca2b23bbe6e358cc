// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::NormalizeError;
use crate::history::HistoryError;
use crate::llm::ChatError;
use crate::scrape::ScrapeError;

/// The single JSON error envelope every failing route returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad or missing input
    #[error("{0}")]
    Validation(String),

    /// Fetch or model-service failure, including timeouts
    #[error("{0}")]
    Upstream(String),

    /// Caller exceeded a request-rate limit
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// History index out of range
    #[error("Item not found")]
    ItemNotFound,

    /// Requested data does not exist (yet)
    #[error("{0}")]
    NotFound(String),

    /// Model response was not structured data
    #[error("Failed to parse AI response")]
    ParseFailure,

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Upstream(_) => 503,
            ApiError::RateLimited => 429,
            ApiError::ItemNotFound => 400,
            ApiError::NotFound(_) => 404,
            ApiError::ParseFailure => 400,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::response::Json(self.to_response())).into_response()
    }
}

impl From<ScrapeError> for ApiError {
    fn from(e: ScrapeError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError::Upstream(format!("API request failed: {}", e))
    }
}

impl From<NormalizeError> for ApiError {
    fn from(_: NormalizeError) -> Self {
        ApiError::ParseFailure
    }
}

impl From<HistoryError> for ApiError {
    fn from(_: HistoryError) -> Self {
        ApiError::ItemNotFound
    }
}
