// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation of the comparison endpoint's query parameters.

use chrono::NaiveDate;

use super::Metric;
use crate::error::{ApiError, ValidationIssue};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated comparison query parameters. Immutable after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub countries: Vec<String>,
    pub metric: Metric,
    /// Accepted and kept in the cache key, but no skip is derived from it;
    /// pagination was never wired past the limit cap.
    pub page: u32,
    pub limit: usize,
}

impl ComparisonParams {
    /// Parse and validate a raw query string.
    ///
    /// `country` is repeatable; a single scalar value becomes a one-element
    /// list. All failures are collected into one `ApiError::Validation` so
    /// the response can report every bad field at once. Non-numeric `page`
    /// and `limit` values fall back to their defaults rather than failing.
    pub fn from_query(raw: &str) -> Result<Self, ApiError> {
        let pairs: Vec<(String, String)> =
            form_urlencoded::parse(raw.as_bytes()).into_owned().collect();
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        let mut issues = Vec::new();

        let start_date = parse_date(first("startDate"), "startDate", &mut issues);
        let end_date = parse_date(first("endDate"), "endDate", &mut issues);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                issues.push(ValidationIssue::new(
                    "startDate",
                    "startDate must be less than or equal to endDate",
                ));
            }
        }

        let countries: Vec<String> = pairs
            .iter()
            .filter(|(key, _)| key == "country")
            .map(|(_, value)| value.clone())
            .collect();
        if countries.is_empty() {
            issues.push(ValidationIssue::new(
                "country",
                "at least one country is required",
            ));
        }

        let metric = match first("query_type") {
            None => {
                issues.push(ValidationIssue::new("query_type", "query_type is required"));
                None
            }
            Some(raw_metric) => match Metric::parse(raw_metric) {
                Some(metric) => Some(metric),
                None => {
                    issues.push(ValidationIssue::new(
                        "query_type",
                        format!("unknown metric: {raw_metric}"),
                    ));
                    None
                }
            },
        };

        let page = first("page")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PAGE);
        let limit = first("limit")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_LIMIT);

        if !issues.is_empty() {
            return Err(ApiError::Validation(issues));
        }

        // Every None above pushed an issue, so the fallthrough arm is
        // unreachable once the issue check has passed.
        match (start_date, end_date, metric) {
            (Some(start_date), Some(end_date), Some(metric)) => Ok(Self {
                start_date,
                end_date,
                countries,
                metric,
                page,
                limit,
            }),
            _ => Err(ApiError::Validation(issues)),
        }
    }
}

fn parse_date(
    raw: Option<&str>,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<NaiveDate> {
    match raw {
        None => {
            issues.push(ValidationIssue::new(field, format!("{field} is required")));
            None
        }
        Some(value) => match NaiveDate::parse_from_str(value, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                issues.push(ValidationIssue::new(
                    field,
                    format!("invalid {field}: expected YYYY-MM-DD"),
                ));
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(err: ApiError) -> Vec<ValidationIssue> {
        match err {
            ApiError::Validation(issues) => issues,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_query_parses() {
        let params = ComparisonParams::from_query(
            "startDate=2021-01-01&endDate=2021-01-31&country=USA&country=IND\
             &query_type=total_cases&page=2&limit=5",
        )
        .unwrap();

        assert_eq!(params.start_date.to_string(), "2021-01-01");
        assert_eq!(params.end_date.to_string(), "2021-01-31");
        assert_eq!(params.countries, vec!["USA", "IND"]);
        assert_eq!(params.metric, Metric::TotalCases);
        assert_eq!(params.page, 2);
        assert_eq!(params.limit, 5);
    }

    #[test]
    fn scalar_country_becomes_one_element_list() {
        let params = ComparisonParams::from_query(
            "startDate=2021-01-01&endDate=2021-01-31&country=USA&query_type=total_cases",
        )
        .unwrap();
        assert_eq!(params.countries, vec!["USA"]);
    }

    #[test]
    fn page_and_limit_default_when_absent_or_non_numeric() {
        let params = ComparisonParams::from_query(
            "startDate=2021-01-01&endDate=2021-01-31&country=USA&query_type=total_cases\
             &page=abc&limit=",
        )
        .unwrap();
        assert_eq!(params.page, DEFAULT_PAGE);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn start_after_end_references_both_fields() {
        let err = ComparisonParams::from_query(
            "startDate=2021-02-01&endDate=2021-01-01&country=USA&query_type=total_cases",
        )
        .unwrap_err();
        let issues = issues(err);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "startDate");
        assert!(issues[0].message.contains("startDate"));
        assert!(issues[0].message.contains("endDate"));
    }

    #[test]
    fn missing_country_fails() {
        let err = ComparisonParams::from_query(
            "startDate=2021-01-01&endDate=2021-01-31&query_type=total_cases",
        )
        .unwrap_err();
        let issues = issues(err);
        assert!(issues.iter().any(|issue| issue.field == "country"));
    }

    #[test]
    fn unknown_metric_fails() {
        let err = ComparisonParams::from_query(
            "startDate=2021-01-01&endDate=2021-01-31&country=USA&query_type=nope",
        )
        .unwrap_err();
        let issues = issues(err);
        assert!(issues.iter().any(|issue| issue.field == "query_type"));
    }

    #[test]
    fn malformed_dates_fail_per_field() {
        let err = ComparisonParams::from_query(
            "startDate=yesterday&endDate=01/31/2021&country=USA&query_type=total_cases",
        )
        .unwrap_err();
        let issues = issues(err);
        assert!(issues.iter().any(|issue| issue.field == "startDate"));
        assert!(issues.iter().any(|issue| issue.field == "endDate"));
    }

    #[test]
    fn all_failures_are_reported_together() {
        let err = ComparisonParams::from_query("").unwrap_err();
        let issues = issues(err);
        let fields: Vec<_> = issues.iter().map(|issue| issue.field.as_str()).collect();
        assert!(fields.contains(&"startDate"));
        assert!(fields.contains(&"endDate"));
        assert!(fields.contains(&"country"));
        assert!(fields.contains(&"query_type"));
    }
}
