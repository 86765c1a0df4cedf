// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/health - Health check endpoint.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "covid-stats-api",
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "covid-stats-api",
        version: env!("CARGO_PKG_VERSION"),
        description: "COVID-19 statistics API serving cached MongoDB aggregations",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/comparison",
                description: "Per-date metric values for the requested locations",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/region-aggregations",
                description: "Per-continent sums and averages",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/vaccination-coverage",
                description: "Average vaccination rate per country",
            },
        ],
    })
}
