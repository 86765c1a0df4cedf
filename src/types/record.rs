// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The per-location, per-day dataset record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of COVID statistics for a single location and day.
///
/// Loaded read-only from the dataset collection; the crate never writes
/// records. Every numeric column is optional because the CSV import leaves
/// gaps where a figure was never reported, and query projections drop all
/// columns a request does not ask for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricRecord {
    pub iso_code: Option<String>,
    pub continent: Option<String>,
    pub location: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub total_cases: Option<f64>,
    pub new_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub new_deaths: Option<f64>,
    pub total_cases_per_million: Option<f64>,
    pub new_cases_per_million: Option<f64>,
    pub total_deaths_per_million: Option<f64>,
    pub new_deaths_per_million: Option<f64>,
    pub stringency_index: Option<f64>,
    pub population_density: Option<f64>,
    pub median_age: Option<f64>,
    pub aged_65_older: Option<f64>,
    pub aged_70_older: Option<f64>,
    pub gdp_per_capita: Option<f64>,
    pub extreme_poverty: Option<f64>,
    pub cardiovasc_death_rate: Option<f64>,
    pub diabetes_prevalence: Option<f64>,
    pub female_smokers: Option<f64>,
    pub male_smokers: Option<f64>,
    pub hospital_beds_per_thousand: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub human_development_index: Option<f64>,
    pub population: Option<f64>,
    pub people_vaccinated_per_hundred: Option<f64>,
    pub excess_mortality_cumulative_absolute: Option<f64>,
    pub excess_mortality_cumulative: Option<f64>,
    pub excess_mortality: Option<f64>,
    pub excess_mortality_cumulative_per_million: Option<f64>,
}
