// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use kpopwire::{api::AppState, config::AppConfig};
use std::{env, sync::Arc, time::Duration};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("🚀 Starting {}", kpopwire::version::get_version_string());

    let config = AppConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let state = AppState::from_config(&config);

    // Hourly trending refresh; the route also refreshes opportunistically on
    // stale reads, so a failed background cycle only delays freshness.
    if config.trending.api_key.is_some() {
        let interval = Duration::from_secs(config.trending.refresh_secs);
        Arc::clone(&state.trending).spawn_refresh(interval);
        info!(
            interval_secs = config.trending.refresh_secs,
            "trending refresh task started"
        );
    } else {
        warn!("GNEWS_API_KEY not set; trending news disabled");
    }

    kpopwire::api::start_server(&config.listen_addr, state)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
