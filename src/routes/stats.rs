// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Statistics endpoints.
//!
//! Each handler validates its parameters, derives a cache key, and answers
//! through the read-through cache gateway; only a miss touches the dataset
//! store.

use axum::extract::{RawQuery, State};
use axum::Json;

use crate::error::ApiError;
use crate::services::cache::{comparison_key, REGION_AGGREGATES_KEY, VACCINATION_COVERAGE_KEY};
use crate::services::stats::{build_comparison_rows, round_coverage};
use crate::types::{ComparisonParams, ComparisonRow, RegionAggregate, VaccinationCoverage};
use crate::AppState;

/// GET /api/comparison - per-date values of one metric across locations.
///
/// Extracted from the raw query string because `country` is repeatable and
/// map-based extractors keep only the last occurrence.
pub async fn comparison(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<ComparisonRow>>, ApiError> {
    let params = ComparisonParams::from_query(query.as_deref().unwrap_or(""))?;
    let key = comparison_key(&params);

    let store = state.store.clone();
    let query_params = params.clone();
    let rows = state
        .cache
        .get_or_compute(&key, || async move {
            let records = store.comparison_records(&query_params).await?;
            Ok(build_comparison_rows(
                &records,
                query_params.metric,
                query_params.limit,
            ))
        })
        .await?;

    Ok(Json(rows))
}

/// GET /api/region-aggregations - per-continent sums and averages.
pub async fn region_aggregations(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegionAggregate>>, ApiError> {
    let store = state.store.clone();
    let rows = state
        .cache
        .get_or_compute(REGION_AGGREGATES_KEY, || async move {
            store.region_aggregates().await
        })
        .await?;

    Ok(Json(rows))
}

/// GET /api/vaccination-coverage - average vaccination rate per country,
/// rounded to two decimal places.
pub async fn vaccination_coverage(
    State(state): State<AppState>,
) -> Result<Json<Vec<VaccinationCoverage>>, ApiError> {
    let store = state.store.clone();
    let rows = state
        .cache
        .get_or_compute(VACCINATION_COVERAGE_KEY, || async move {
            Ok(round_coverage(store.vaccination_averages().await?))
        })
        .await?;

    Ok(Json(rows))
}
