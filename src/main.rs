// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! COVID statistics server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use mongodb::Client;

use covid_stats_api::config::Config;
use covid_stats_api::services::cache::{CacheGateway, RedisStore};
use covid_stats_api::services::dataset::MongoDatasetStore;
use covid_stats_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,covid_stats_api=debug".into()),
        )
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        mongodb_db = %config.mongodb_db,
        cache_ttl_days = config.cache_ttl_days,
        "starting covid-stats-api"
    );

    // Construct the external clients once; everything downstream borrows
    // them through AppState.
    let mongo = Client::with_uri_str(&config.mongodb_uri)
        .await
        .context("connect to MongoDB")?;
    tracing::info!("connected to MongoDB");

    let redis = RedisStore::connect(&config.redis_url)
        .await
        .context("connect to Redis")?;

    let store = Arc::new(MongoDatasetStore::new(&mongo, &config.mongodb_db));
    let cache = CacheGateway::new(
        Arc::new(redis),
        Duration::from_secs(config.cache_ttl_days * 24 * 3600),
    );

    let state = AppState {
        store,
        cache,
        config: Arc::new(config.clone()),
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind listener")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received");
}
