//! Dataset response caching with moka
//!
//! Wraps any `SalesApi` and memoises group-scoped dataset fetches for a
//! fixed TTL, matching the dashboard's five-minute data cache.
//!
//! # Error Handling
//!
//! Only non-empty `Ok` results are cached. Transport errors and rejected
//! envelopes (which arrive as empty lists) always reach the backend again
//! on the next read.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use salesdesk_core::SalesApi;
use salesdesk_domain::{
    CacheConfig, ChangePasswordRequest, Dataset, Envelope, GroupInfo, LoginRequest,
    LumpSumPriceUpdate, Record, Result, SolutionPriceUpdate, StageUpdate,
};
use serde_json::Value;
use tracing::debug;

/// Cache tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetCacheConfig {
    /// Time-to-live for cache entries
    pub ttl: Duration,

    /// Maximum number of `(dataset, group)` entries
    pub max_capacity: u64,
}

impl From<&CacheConfig> for DatasetCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self { ttl: Duration::from_secs(config.ttl_seconds), max_capacity: config.max_capacity }
    }
}

impl Default for DatasetCacheConfig {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl DatasetCacheConfig {
    /// Create config with custom TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, ..Self::default() }
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(
            ttl_seconds = self.ttl.as_secs(),
            max_capacity = self.max_capacity,
            "dataset cache configuration loaded"
        );
    }
}

type CacheKey = (Dataset, String);

/// `SalesApi` decorator that memoises dataset fetches.
///
/// Searches, logins and mutations always pass straight through.
pub struct CachedSalesApi<A> {
    inner: A,
    datasets: Cache<CacheKey, Arc<Vec<Record>>>,
}

impl<A: SalesApi> CachedSalesApi<A> {
    pub fn new(inner: A, config: DatasetCacheConfig) -> Self {
        config.log_config();
        let datasets =
            Cache::builder().time_to_live(config.ttl).max_capacity(config.max_capacity).build();
        Self { inner, datasets }
    }

    pub const fn inner(&self) -> &A {
        &self.inner
    }

    /// Number of live entries. Pending maintenance is run first so the count
    /// reflects recent inserts and invalidations.
    pub async fn entry_count(&self) -> u64 {
        self.datasets.run_pending_tasks().await;
        self.datasets.entry_count()
    }
}

#[async_trait]
impl<A: SalesApi> SalesApi for CachedSalesApi<A> {
    async fn sales_names(&self) -> Result<Vec<String>> {
        self.inner.sales_names().await
    }

    async fn fetch_dataset(&self, dataset: Dataset, sales_group: &str) -> Result<Vec<Record>> {
        let key = (dataset, sales_group.to_string());
        if let Some(rows) = self.datasets.get(&key).await {
            debug!(dataset = %dataset, sales_group, "dataset cache hit");
            return Ok(rows.as_ref().clone());
        }

        debug!(dataset = %dataset, sales_group, "dataset cache miss");
        let rows = self.inner.fetch_dataset(dataset, sales_group).await?;
        if !rows.is_empty() {
            self.datasets.insert(key, Arc::new(rows.clone())).await;
        }
        Ok(rows)
    }

    async fn search(
        &self,
        column: &str,
        value: &str,
        sales_group: Option<&str>,
    ) -> Envelope<Vec<Record>> {
        self.inner.search(column, value, sales_group).await
    }

    async fn validate_password(&self, request: &LoginRequest) -> Envelope<GroupInfo> {
        self.inner.validate_password(request).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Envelope<Value> {
        self.inner.change_password(request).await
    }

    async fn update_by_sales(&self, update: &StageUpdate) -> Envelope<Value> {
        self.inner.update_by_sales(update).await
    }

    async fn update_solution_price(&self, update: &SolutionPriceUpdate) -> Envelope<Value> {
        self.inner.update_solution_price(update).await
    }

    async fn update_lump_sum_price(&self, update: &LumpSumPriceUpdate) -> Envelope<Value> {
        self.inner.update_lump_sum_price(update).await
    }

    fn clear_cache(&self) {
        debug!("dataset cache cleared");
        self.datasets.invalidate_all();
        self.inner.clear_cache();
    }
}
