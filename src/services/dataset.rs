// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dataset store: the three fixed queries against the metric collection.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, Bson, Document};
use mongodb::{Client, Collection};

use crate::error::ApiError;
use crate::types::{ComparisonParams, MetricRecord, RegionAggregate, VaccinationCoverage};

/// Collection populated by the CSV import job. Read-only here.
pub const COLLECTION: &str = "covid-csv-data";

/// Read-only access to the dataset collection.
///
/// Object-safe so the Mongo-backed implementation can be swapped for an
/// in-memory fake in tests.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Records for the requested locations within the date range, sorted
    /// ascending by date, projected down to date, location, and the
    /// requested metric.
    async fn comparison_records(
        &self,
        params: &ComparisonParams,
    ) -> Result<Vec<MetricRecord>, ApiError>;

    /// Per-continent sums and averages over the whole collection.
    async fn region_aggregates(&self) -> Result<Vec<RegionAggregate>, ApiError>;

    /// Per-country average of people_vaccinated_per_hundred, unrounded.
    async fn vaccination_averages(&self) -> Result<Vec<VaccinationCoverage>, ApiError>;
}

/// MongoDB-backed implementation.
pub struct MongoDatasetStore {
    collection: Collection<Document>,
}

impl MongoDatasetStore {
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            collection: client.database(database).collection(COLLECTION),
        }
    }
}

/// Midnight UTC of a calendar date as a BSON datetime. Records are stored
/// with midnight timestamps, so an inclusive `$lte` on the end date's
/// midnight covers that day's rows.
fn day_start(date: NaiveDate) -> Bson {
    let datetime = date.and_time(NaiveTime::MIN).and_utc();
    Bson::DateTime(mongodb::bson::DateTime::from_chrono(datetime))
}

#[async_trait]
impl DatasetStore for MongoDatasetStore {
    async fn comparison_records(
        &self,
        params: &ComparisonParams,
    ) -> Result<Vec<MetricRecord>, ApiError> {
        let filter = doc! {
            "location": { "$in": params.countries.clone() },
            "date": {
                "$gte": day_start(params.start_date),
                "$lte": day_start(params.end_date),
            },
        };
        let metric_field = params.metric.as_str();
        let projection = doc! {
            "date": 1,
            "location": 1,
            metric_field: 1,
            "_id": 0,
        };

        let mut cursor = self
            .collection
            .find(filter)
            .projection(projection)
            .sort(doc! { "date": 1 })
            .await?;

        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            records.push(from_document(document)?);
        }
        Ok(records)
    }

    async fn region_aggregates(&self) -> Result<Vec<RegionAggregate>, ApiError> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": "$continent",
                "total_cases": { "$sum": { "$toDouble": { "$ifNull": ["$total_cases", 0] } } },
                "total_deaths": { "$sum": { "$toDouble": { "$ifNull": ["$total_deaths", 0] } } },
                "female_smokers": { "$avg": { "$toDouble": { "$ifNull": ["$female_smokers", 0] } } },
                "male_smokers": { "$avg": { "$toDouble": { "$ifNull": ["$male_smokers", 0] } } },
                "aged_65_older": { "$avg": { "$toDouble": { "$ifNull": ["$aged_65_older", 0] } } },
                "aged_70_older": { "$avg": { "$toDouble": { "$ifNull": ["$aged_70_older", 0] } } },
            },
        }];

        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .allow_disk_use(true)
            .await?;

        let mut rows = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            rows.push(from_document(document)?);
        }
        Ok(rows)
    }

    async fn vaccination_averages(&self) -> Result<Vec<VaccinationCoverage>, ApiError> {
        let pipeline = vec![
            doc! {
                "$group": {
                    "_id": "$iso_code",
                    "value": {
                        "$avg": { "$toDouble": { "$ifNull": ["$people_vaccinated_per_hundred", 0] } }
                    },
                },
            },
            doc! {
                "$project": { "_id": 0, "id": "$_id", "value": 1 },
            },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;

        let mut rows = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            rows.push(from_document(document)?);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_start_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        match day_start(date) {
            Bson::DateTime(dt) => {
                assert_eq!(dt.to_chrono().to_rfc3339(), "2021-01-01T00:00:00+00:00");
            }
            other => panic!("expected datetime, got {other:?}"),
        }
    }
}
