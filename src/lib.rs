// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! COVID-19 statistics API.
//!
//! Serves pre-aggregated statistics from a MongoDB dataset collection, with
//! a read-through Redis cache in front of the aggregation queries.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/comparison` - Per-date values of one metric across locations
//! - `GET /api/region-aggregations` - Per-continent sums and averages
//! - `GET /api/vaccination-coverage` - Average vaccination rate per country

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod types;

use config::Config;
use services::cache::CacheGateway;
use services::dataset::DatasetStore;

/// Application state shared across handlers.
///
/// Clients are constructed once at startup and injected here; handlers hold
/// no other shared state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DatasetStore>,
    pub cache: CacheGateway,
    pub config: Arc<Config>,
}

/// Build the API router with all routes and middleware layers.
pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/health", get(routes::health::check))
        // Statistics endpoints
        .route("/api/comparison", get(routes::stats::comparison))
        .route(
            "/api/region-aggregations",
            get(routes::stats::region_aggregations),
        )
        .route(
            "/api/vaccination-coverage",
            get(routes::stats::vaccination_coverage),
        )
        // Middleware
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
