// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-through cache over a key-value store with per-entry expiry.
//!
//! Keys are canonical strings derived from the parameters that affect a
//! result: identical effective parameters always map to the same entry, and
//! distinct parameter combinations never collide because every value is
//! concatenated with fixed delimiters in a fixed order.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;
use crate::types::ComparisonParams;

/// Cache key for a comparison query.
pub fn comparison_key(params: &ComparisonParams) -> String {
    format!(
        "comparison:{}:{}:{}:{}:page:{}:limit:{}",
        params.start_date,
        params.end_date,
        params.countries.join(","),
        params.metric.as_str(),
        params.page,
        params.limit
    )
}

/// Region aggregates take no parameters; one cache entry ever.
pub const REGION_AGGREGATES_KEY: &str = "regions-aggregates-essentials";

/// Vaccination coverage takes no parameters; one cache entry ever.
pub const VACCINATION_COVERAGE_KEY: &str = "vaccination-coverage";

/// Key-value store with per-entry expiry.
///
/// Object-safe so handlers run against Redis in production and an in-memory
/// map in tests.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ApiError>;
}

/// Redis-backed store.
///
/// The connection manager multiplexes one connection and reconnects on
/// failure; clones are cheap handles onto the same connection.
pub struct RedisStore {
    conn: redis::aio::ConnectionManager,
}

impl RedisStore {
    /// Open a connection manager against the given Redis URL.
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        tracing::info!(url = %url, "connected to Redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ApiError> {
        let mut conn = self.conn.clone();
        let () = conn.set_ex(key, value, ttl.as_secs()).await?;
        Ok(())
    }
}

/// In-memory store for tests and single-process setups.
///
/// Accepts the TTL but does not enforce it; entries live for the process
/// lifetime.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: tokio::sync::Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_ex(&self, key: &str, value: &str, _ttl: Duration) -> Result<(), ApiError> {
        self.entries.lock().await.insert(key.into(), value.into());
        Ok(())
    }
}

/// Read-through cache gateway.
///
/// Looks up the key first; on a hit the cached JSON is deserialized and
/// returned without computing. On a miss the value is computed, stored under
/// the key with the configured TTL, and returned. Store failures on either
/// path propagate to the caller as a 500 — an unreachable store is never
/// downgraded to a silent recompute.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CacheGateway {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, compute: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(raw) = self.store.get(key).await? {
            tracing::debug!(key = %key, "cache hit");
            return Ok(serde_json::from_str(&raw)?);
        }

        tracing::debug!(key = %key, "cache miss, computing");
        let value = compute().await?;
        self.store
            .set_ex(key, &serde_json::to_string(&value)?, self.ttl)
            .await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metric;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn params(metric: Metric) -> ComparisonParams {
        ComparisonParams {
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
            countries: vec!["USA".into(), "IND".into()],
            metric,
            page: 1,
            limit: 10,
        }
    }

    #[test]
    fn comparison_key_is_canonical() {
        assert_eq!(
            comparison_key(&params(Metric::TotalCases)),
            "comparison:2021-01-01:2021-01-02:USA,IND:total_cases:page:1:limit:10"
        );
    }

    #[test]
    fn comparison_keys_differ_when_only_the_metric_differs() {
        let cases = comparison_key(&params(Metric::TotalCases));
        let deaths = comparison_key(&params(Metric::TotalDeaths));
        assert_ne!(cases, deaths);
    }

    #[test]
    fn identical_params_produce_identical_keys() {
        assert_eq!(
            comparison_key(&params(Metric::TotalCases)),
            comparison_key(&params(Metric::TotalCases))
        );
    }

    #[tokio::test]
    async fn get_or_compute_computes_once_then_serves_hits() {
        let gateway = CacheGateway::new(Arc::new(MemoryStore::default()), Duration::from_secs(60));
        let computations = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Vec<u32> = gateway
                .get_or_compute("k", || async {
                    computations.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(value, vec![1, 2, 3]);
        }

        assert_eq!(computations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_keys_cache_independently() {
        let gateway = CacheGateway::new(Arc::new(MemoryStore::default()), Duration::from_secs(60));

        let a: u32 = gateway.get_or_compute("a", || async { Ok(1) }).await.unwrap();
        let b: u32 = gateway.get_or_compute("b", || async { Ok(2) }).await.unwrap();
        let a_again: u32 = gateway
            .get_or_compute("a", || async { Ok(99) })
            .await
            .unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(a_again, 1);
    }

    #[tokio::test]
    async fn compute_errors_propagate_and_nothing_is_cached() {
        let gateway = CacheGateway::new(Arc::new(MemoryStore::default()), Duration::from_secs(60));

        let result: Result<u32, _> = gateway
            .get_or_compute("k", || async { Err(ApiError::Internal("boom".into())) })
            .await;
        assert!(result.is_err());

        let value: u32 = gateway.get_or_compute("k", || async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }
}
