// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result shaping for the statistics endpoints.

use std::collections::BTreeMap;

use crate::types::{ComparisonRow, Metric, MetricRecord, VaccinationCoverage};

/// Fold date-sorted records into one row per calendar date.
///
/// Each row carries `lowercased location -> metric value` for every location
/// reported on that date; a record missing the metric contributes 0. Rows
/// keep the incoming ascending date order and the grouped result is capped
/// at `limit`. No skip is applied.
pub fn build_comparison_rows(
    records: &[MetricRecord],
    metric: Metric,
    limit: usize,
) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = Vec::new();

    for record in records {
        let date = record.date.format("%Y-%m-%d").to_string();
        let location = record.location.to_lowercase();
        let value = metric.value_of(record).unwrap_or(0.0);

        match rows.iter_mut().find(|row| row.date == date) {
            Some(row) => {
                row.values.insert(location, value);
            }
            None => {
                let mut values = BTreeMap::new();
                values.insert(location, value);
                rows.push(ComparisonRow { date, values });
            }
        }
    }

    rows.truncate(limit);
    rows
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round every coverage average to two decimal places.
pub fn round_coverage(mut rows: Vec<VaccinationCoverage>) -> Vec<VaccinationCoverage> {
    for row in &mut rows {
        row.value = round2(row.value);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn record(location: &str, date: &str, total_cases: Option<f64>) -> MetricRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc();
        MetricRecord {
            location: location.to_string(),
            date,
            total_cases,
            ..MetricRecord::default()
        }
    }

    #[test]
    fn groups_records_by_date_with_lowercased_locations() {
        let records = vec![
            record("USA", "2021-01-01", Some(41.0)),
            record("IND", "2021-01-01", Some(20.0)),
            record("USA", "2021-01-02", Some(45.0)),
            record("IND", "2021-01-02", Some(23.0)),
        ];

        let rows = build_comparison_rows(&records, Metric::TotalCases, 10);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2021-01-01");
        assert_eq!(rows[0].values.get("usa"), Some(&41.0));
        assert_eq!(rows[0].values.get("ind"), Some(&20.0));
        assert_eq!(rows[1].date, "2021-01-02");
        assert_eq!(rows[1].values.get("usa"), Some(&45.0));
        assert_eq!(rows[1].values.get("ind"), Some(&23.0));
    }

    #[test]
    fn missing_metric_values_become_zero() {
        let records = vec![record("USA", "2021-01-01", None)];
        let rows = build_comparison_rows(&records, Metric::TotalCases, 10);
        assert_eq!(rows[0].values.get("usa"), Some(&0.0));
    }

    #[test]
    fn grouped_rows_are_capped_at_limit() {
        let records = vec![
            record("USA", "2021-01-01", Some(1.0)),
            record("USA", "2021-01-02", Some(2.0)),
            record("USA", "2021-01-03", Some(3.0)),
        ];

        let rows = build_comparison_rows(&records, Metric::TotalCases, 2);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].date, "2021-01-02");
    }

    #[test]
    fn date_order_is_preserved() {
        let records = vec![
            record("USA", "2021-01-01", Some(1.0)),
            record("IND", "2021-01-01", Some(2.0)),
            record("USA", "2021-01-03", Some(3.0)),
        ];

        let rows = build_comparison_rows(&records, Metric::TotalCases, 10);
        let dates: Vec<_> = rows.iter().map(|row| row.date.as_str()).collect();
        assert_eq!(dates, vec!["2021-01-01", "2021-01-03"]);
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(15.0), 15.0);
    }

    #[test]
    fn round_coverage_rounds_every_row() {
        let rows = vec![
            VaccinationCoverage {
                id: Some("USA".into()),
                value: 15.0,
            },
            VaccinationCoverage {
                id: Some("IND".into()),
                value: 33.333,
            },
        ];

        let rounded = round_coverage(rows);
        assert_eq!(rounded[0].value, 15.0);
        assert_eq!(rounded[1].value, 33.33);
    }
}
