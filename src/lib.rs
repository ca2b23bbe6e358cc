// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod content;
pub mod history;
pub mod llm;
pub mod scrape;
pub mod session;
pub mod trending;
pub mod version;

// Re-export main types
pub use api::{build_router, start_server, ApiError, AppState, ErrorResponse, RateLimiter};
pub use config::AppConfig;
pub use content::{ContentNormalizer, SocialContent, TextCleaner};
pub use history::{HistoryError, HistoryManager, SessionState};
pub use llm::{ChatClient, ChatMessage};
pub use scrape::{ArticleExtractor, ScrapedArticle};
pub use session::{Session, SessionStore};
pub use trending::{GNewsProvider, NewsItem, NewsProvider, TrendingService, TrendingSnapshot};
