use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::models::{BoundingBox, GeoPoint};

/// In-memory TTL cache for collaborator responses
///
/// A capacity of zero disables caching; every lookup misses.
#[derive(Clone)]
pub struct ResponseCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    inner: Option<moka::future::Cache<String, V>>,
}

impl<V> ResponseCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        if capacity == 0 || ttl_secs == 0 {
            return Self::disabled();
        }

        let inner = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner: Some(inner) }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let cache = self.inner.as_ref()?;
        let hit = cache.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, value: V) {
        if let Some(cache) = &self.inner {
            tracing::trace!("Cache set: {}", key);
            cache.insert(key, value).await;
        }
    }

    /// Entry count after pending evictions have been applied
    pub async fn stats(&self) -> CacheStats {
        let entries = match &self.inner {
            Some(cache) => {
                cache.run_pending_tasks().await;
                cache.entry_count()
            }
            None => 0,
        };

        CacheStats {
            enabled: self.is_enabled(),
            entries,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a free-text forward search
    pub fn search(query: &str, limit: usize) -> String {
        format!("search:{}:{}", query.trim().to_lowercase(), limit)
    }

    /// Key for an area search, coordinates rounded to ~100m
    pub fn area(bbox: &BoundingBox, query: &str, limit: usize) -> String {
        format!(
            "area:{:.3},{:.3},{:.3},{:.3}:{}:{}",
            bbox.min_lat,
            bbox.min_lon,
            bbox.max_lat,
            bbox.max_lon,
            query.trim().to_lowercase(),
            limit
        )
    }

    /// Key for a reverse lookup
    pub fn reverse(point: GeoPoint) -> String {
        format!("reverse:{:.4},{:.4}", point.lat, point.lon)
    }
}
