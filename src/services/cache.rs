use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MatchTier, SearchFilters, SearchTab};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-memory search response cache
///
/// A pure optimization over the search reducer: the pipeline is
/// referentially transparent, so a hit returns exactly what a recompute
/// would. Entries expire on TTL; favorites churn is handled by keying on
/// the full request tuple rather than by invalidation.
pub struct SearchCache {
    inner: moka::future::Cache<String, Vec<u8>>,
}

impl SearchCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    /// Get a cached value
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.inner.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Store a value
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.inner.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Deterministic key over the full search request tuple
    pub fn search(
        filters: &SearchFilters,
        tab: SearchTab,
        tier: MatchTier,
        favorite_ids: &[u64],
    ) -> String {
        // Favorites are sorted so set order never splits cache entries
        let mut favorites = favorite_ids.to_vec();
        favorites.sort_unstable();
        favorites.dedup();

        let favorites = favorites
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "search:{}:{:?}:{:?}:{:?}:{:?}:{:?}:{:?}:[{}]",
            filters.location.trim().to_lowercase(),
            filters.max_budget,
            filters.room_type,
            filters.start_date,
            filters.end_date,
            tab,
            tier,
            favorites
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomTypeFilter;

    #[tokio::test]
    async fn test_cache_set_get_roundtrip() {
        let cache = SearchCache::new(100, 60);

        cache.set("k", &vec![1u64, 2, 3]).await.unwrap();
        let value: Vec<u64> = cache.get("k").await.unwrap();
        assert_eq!(value, vec![1, 2, 3]);

        assert!(cache.get::<Vec<u64>>("missing").await.is_err());
    }

    #[test]
    fn test_search_key_is_deterministic() {
        let filters = SearchFilters {
            location: "Denver".to_string(),
            max_budget: Some(2000),
            room_type: RoomTypeFilter::Any,
            start_date: None,
            end_date: None,
        };

        let a = CacheKey::search(&filters, SearchTab::All, MatchTier::All, &[3, 1, 1]);
        let b = CacheKey::search(&filters, SearchTab::All, MatchTier::All, &[1, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_search_key_separates_tiers() {
        let filters = SearchFilters::default();
        let all = CacheKey::search(&filters, SearchTab::All, MatchTier::All, &[]);
        let perfect = CacheKey::search(&filters, SearchTab::All, MatchTier::Perfect, &[]);
        assert_ne!(all, perfect);
    }
}
