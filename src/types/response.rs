// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the statistics endpoints.
//!
//! All three derive `Deserialize` as well: cached entries are stored as
//! JSON and read back through the same types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One comparison row: a calendar date plus one value per lowercased
/// location reported on that date.
///
/// Serializes flat, e.g. `{"date": "2021-01-01", "usa": 41.0, "ind": 20.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

/// Aggregates for one continent.
///
/// The continent name stays under `_id`, matching the grouping stage's
/// output. `None` when source rows carry no continent (world-level rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAggregate {
    #[serde(rename = "_id")]
    pub continent: Option<String>,
    pub total_cases: f64,
    pub total_deaths: f64,
    pub female_smokers: f64,
    pub male_smokers: f64,
    pub aged_65_older: f64,
    pub aged_70_older: f64,
}

/// Average vaccination coverage for one ISO country code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationCoverage {
    pub id: Option<String>,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_row_serializes_flat() {
        let mut values = BTreeMap::new();
        values.insert("usa".to_string(), 41.0);
        values.insert("ind".to_string(), 20.0);
        let row = ComparisonRow {
            date: "2021-01-01".to_string(),
            values,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": "2021-01-01", "usa": 41.0, "ind": 20.0})
        );
    }

    #[test]
    fn comparison_row_round_trips_through_json() {
        let mut values = BTreeMap::new();
        values.insert("usa".to_string(), 41.0);
        let row = ComparisonRow {
            date: "2021-01-01".to_string(),
            values,
        };

        let raw = serde_json::to_string(&row).unwrap();
        let back: ComparisonRow = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, row);
    }
}
