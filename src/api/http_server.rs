use axum::{
    extract::{ConnectInfo, Json, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Local;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use uuid::Uuid;

use super::handlers::{
    DeleteResponse, HealthResponse, HistoryResponse, RewriteRequest, RewriteResponse,
    ScrapeRequest, ScrapeResponse, SocialRequest, SocialResponse, TrendingResponse,
};
use super::rate_limiter::RateLimiter;
use super::ApiError;
use crate::config::AppConfig;
use crate::content::{prompts, ContentNormalizer};
use crate::history::HistoryManager;
use crate::llm::{ChatClient, ChatMessage};
use crate::scrape::ArticleExtractor;
use crate::session::SessionStore;
use crate::trending::{GNewsProvider, NewsProvider, TrendingService};

/// Session category key for rewritten articles.
pub const ARTICLE_HISTORY_KEY: &str = "article_history";
/// Session category key for generated social content.
pub const INSTAGRAM_HISTORY_KEY: &str = "instagram_history";

const SESSION_COOKIE: &str = "session_id";

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatClient>,
    pub extractor: Arc<ArticleExtractor>,
    pub normalizer: Arc<ContentNormalizer>,
    pub sessions: Arc<SessionStore>,
    pub trending: Arc<TrendingService>,
    pub api_limiter: Arc<Mutex<RateLimiter>>,
    pub scrape_limiter: Arc<Mutex<RateLimiter>>,
    pub history_max_items: usize,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let provider: Arc<dyn NewsProvider> = Arc::new(GNewsProvider::new(
            config.trending.api_key.clone().unwrap_or_default(),
            config.trending.language.clone(),
            config.trending.country.clone(),
        ));
        let trending = Arc::new(TrendingService::new(
            provider,
            config.trending.query.clone(),
            config.trending.max_results,
            Duration::from_secs(config.trending.refresh_secs),
        ));

        Self {
            chat: Arc::new(ChatClient::new(&config.llm)),
            extractor: Arc::new(ArticleExtractor::new(Duration::from_secs(
                config.scrape_timeout_secs,
            ))),
            normalizer: Arc::new(ContentNormalizer::new()),
            sessions: Arc::new(SessionStore::new(config.max_sessions)),
            trending,
            api_limiter: Arc::new(Mutex::new(RateLimiter::new(
                config.api_rate.max_requests,
                Duration::from_secs(config.api_rate.window_secs),
            ))),
            scrape_limiter: Arc::new(Mutex::new(RateLimiter::new(
                config.scrape_rate.max_requests,
                Duration::from_secs(config.scrape_rate.window_secs),
            ))),
            history_max_items: config.history_max_items,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Article rewriting
        .route("/rewrite", post(rewrite_handler))
        .route("/scrape", post(scrape_handler))
        .route("/history", get(history_handler))
        .route("/history/delete/:index", delete(delete_history_handler))
        // Social content
        .route("/generate_instagram", post(generate_instagram_handler))
        .route("/instagram_history", get(instagram_history_handler))
        .route(
            "/instagram_history/delete/:index",
            delete(delete_instagram_history_handler),
        )
        // Trending news
        .route("/api/trending-kpop", get(trending_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(
    listen_addr: &str,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    axum::response::Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn rewrite_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    addr: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<RewriteRequest>,
) -> Response {
    let key = client_key(&headers, addr);
    if !state.api_limiter.lock().await.is_allowed(&key) {
        return (jar, ApiError::RateLimited).into_response();
    }

    let (jar, session_id) = get_or_create_session(jar);
    match rewrite_article(&state, &session_id, request).await {
        Ok(response) => (jar, Json(response)).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}

async fn rewrite_article(
    state: &AppState,
    session_id: &str,
    request: RewriteRequest,
) -> Result<RewriteResponse, ApiError> {
    request.validate()?;

    let messages = [
        ChatMessage::system(prompts::REWRITE_SYSTEM_PROMPT),
        ChatMessage::user(prompts::build_rewrite_prompt(&request.text)),
    ];
    let result = state
        .chat
        .chat(
            &messages,
            prompts::REWRITE_TEMPERATURE,
            prompts::REWRITE_MAX_TOKENS,
        )
        .await?;

    let entry = json!({
        "date": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "original": request.text,
        "rewritten": &result,
        "url": request.url,
        "title": request.title,
    });
    let max_items = state.history_max_items;
    state
        .sessions
        .with_session(session_id, |session| {
            HistoryManager::with_capacity(session, ARTICLE_HISTORY_KEY, max_items).add(entry);
        })
        .await;

    Ok(RewriteResponse {
        success: true,
        result,
    })
}

async fn scrape_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    addr: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<ScrapeRequest>,
) -> Response {
    let key = client_key(&headers, addr);
    if !state.scrape_limiter.lock().await.is_allowed(&key) {
        return ApiError::RateLimited.into_response();
    }

    match state.extractor.fetch(&request.url).await {
        Ok(article) => Json(ScrapeResponse {
            text: article.text,
            url: article.url,
            title: article.title,
        })
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

async fn generate_instagram_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    addr: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<SocialRequest>,
) -> Response {
    let key = client_key(&headers, addr);
    if !state.api_limiter.lock().await.is_allowed(&key) {
        return (jar, ApiError::RateLimited).into_response();
    }

    let (jar, session_id) = get_or_create_session(jar);
    match generate_social_content(&state, &session_id, request).await {
        Ok(response) => (jar, Json(response)).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}

async fn generate_social_content(
    state: &AppState,
    session_id: &str,
    request: SocialRequest,
) -> Result<SocialResponse, ApiError> {
    let article = state.extractor.fetch(&request.url).await?;

    let messages = [
        ChatMessage::system(prompts::SOCIAL_SYSTEM_PROMPT),
        ChatMessage::user(prompts::build_social_prompt(&article.title, &article.text)),
    ];
    let content = state
        .chat
        .chat(
            &messages,
            prompts::SOCIAL_TEMPERATURE,
            prompts::SOCIAL_MAX_TOKENS,
        )
        .await?;

    let social = state.normalizer.normalize(&content)?;

    let entry = json!({
        "date": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "headlines": &social.headlines,
        "captions": &social.captions,
        "url": request.url,
    });
    let max_items = state.history_max_items;
    state
        .sessions
        .with_session(session_id, |session| {
            HistoryManager::with_capacity(session, INSTAGRAM_HISTORY_KEY, max_items).add(entry);
        })
        .await;

    Ok(SocialResponse {
        success: true,
        headlines: social.headlines,
        captions: social.captions,
    })
}

async fn history_handler(State(state): State<AppState>, jar: CookieJar) -> Response {
    list_history(state, jar, ARTICLE_HISTORY_KEY).await
}

async fn instagram_history_handler(State(state): State<AppState>, jar: CookieJar) -> Response {
    list_history(state, jar, INSTAGRAM_HISTORY_KEY).await
}

async fn delete_history_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(index): Path<usize>,
) -> Response {
    delete_history(state, jar, ARTICLE_HISTORY_KEY, index).await
}

async fn delete_instagram_history_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(index): Path<usize>,
) -> Response {
    delete_history(state, jar, INSTAGRAM_HISTORY_KEY, index).await
}

async fn list_history(state: AppState, jar: CookieJar, key: &'static str) -> Response {
    let (jar, session_id) = get_or_create_session(jar);
    let max_items = state.history_max_items;
    let history = state
        .sessions
        .with_session(&session_id, |session| {
            HistoryManager::with_capacity(session, key, max_items).list()
        })
        .await;

    (jar, Json(HistoryResponse { history })).into_response()
}

async fn delete_history(
    state: AppState,
    jar: CookieJar,
    key: &'static str,
    index: usize,
) -> Response {
    let (jar, session_id) = get_or_create_session(jar);
    let max_items = state.history_max_items;
    let result = state
        .sessions
        .with_session(&session_id, |session| {
            HistoryManager::with_capacity(session, key, max_items).delete(index)
        })
        .await;

    match result {
        Ok(()) => (jar, Json(DeleteResponse { success: true })).into_response(),
        Err(e) => (jar, ApiError::from(e)).into_response(),
    }
}

async fn trending_handler(State(state): State<AppState>) -> Response {
    match state.trending.current().await {
        Ok(snapshot) => {
            if snapshot.news.is_empty() {
                return ApiError::NotFound("No trending news available".to_string())
                    .into_response();
            }
            Json(TrendingResponse {
                news: snapshot.news,
                last_updated: snapshot.last_updated,
            })
            .into_response()
        }
        Err(e) => ApiError::Internal(e.to_string()).into_response(),
    }
}

/// Read the session id cookie, issuing a fresh one when absent.
fn get_or_create_session(jar: CookieJar) -> (CookieJar, String) {
    if let Some(id) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        return (jar, id);
    }

    let id = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), id)
}

/// Rate-limit key for the caller: first X-Forwarded-For hop when present,
/// otherwise the peer address.
fn client_key(headers: &HeaderMap, addr: Option<ConnectInfo<SocketAddr>>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return first.to_string();
        }
    }

    addr.map(|ConnectInfo(a)| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
