// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Trending news orchestration
//!
//! Coordinates the news provider, the TTL snapshot cache, and the
//! background refresh task. Concurrent stale reads collapse onto a single
//! in-flight fetch, so a burst of requests against an expired cache costs
//! one provider call, not one per request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::provider::NewsProvider;
use super::types::{NewsError, TrendingSnapshot};

struct CachedSnapshot {
    snapshot: TrendingSnapshot,
    fetched_at: Instant,
}

/// TTL-cached trending news with coalesced refreshes.
pub struct TrendingService {
    provider: Arc<dyn NewsProvider>,
    query: String,
    max_results: usize,
    ttl: Duration,
    snapshot: RwLock<Option<CachedSnapshot>>,
    refresh_guard: Mutex<()>,
}

impl TrendingService {
    pub fn new(
        provider: Arc<dyn NewsProvider>,
        query: String,
        max_results: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            provider,
            query,
            max_results,
            ttl,
            snapshot: RwLock::new(None),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Return the current snapshot, refreshing first when it is stale.
    ///
    /// When a refresh fails but an older snapshot exists, the older snapshot
    /// keeps being served; only a failure with no snapshot at all surfaces
    /// the error.
    pub async fn current(&self) -> Result<TrendingSnapshot, NewsError> {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let _guard = self.refresh_guard.lock().await;
        // Another caller may have refreshed while this one waited.
        if let Some(snapshot) = self.fresh().await {
            debug!("trending refresh coalesced with an in-flight fetch");
            return Ok(snapshot);
        }

        match self.fetch_and_store().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                let held = self.snapshot.read().await;
                match held.as_ref() {
                    Some(cached) => {
                        warn!(error = %e, "trending refresh failed; serving previous snapshot");
                        Ok(cached.snapshot.clone())
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Force a refresh, coalescing with any in-flight fetch.
    pub async fn refresh(&self) -> Result<(), NewsError> {
        let _guard = self.refresh_guard.lock().await;
        self.fetch_and_store().await.map(|_| ())
    }

    /// Spawn the fixed-interval background refresh loop.
    pub fn spawn_refresh(self: Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                if let Err(e) = self.refresh().await {
                    warn!(error = %e, "scheduled trending refresh failed");
                }
                sleep(interval).await;
            }
        })
    }

    async fn fresh(&self) -> Option<TrendingSnapshot> {
        let held = self.snapshot.read().await;
        held.as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.snapshot.clone())
    }

    async fn fetch_and_store(&self) -> Result<TrendingSnapshot, NewsError> {
        let news = self
            .provider
            .fetch_top(&self.query, self.max_results)
            .await?;
        let snapshot = TrendingSnapshot {
            news,
            last_updated: Utc::now(),
        };

        let mut held = self.snapshot.write().await;
        *held = Some(CachedSnapshot {
            snapshot: snapshot.clone(),
            fetched_at: Instant::now(),
        });

        info!(
            count = snapshot.news.len(),
            provider = self.provider.name(),
            "trending news refreshed"
        );
        Ok(snapshot)
    }
}
