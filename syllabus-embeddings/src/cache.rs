//! In-memory query embedding cache using moka.

use std::time::Duration;

use moka::sync::Cache;

/// Query embedding cache.
///
/// Keys are blake3 hashes of the text actually sent to the provider.
pub struct QueryCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryCache {
    /// Create a new cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    /// Cache key for a text.
    pub fn key_for(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = QueryCache::new(100);
        let key = QueryCache::key_for("3d коллаж");
        cache.insert(key.clone(), vec![1.0, 2.0]);
        assert_eq!(cache.get(&key), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn miss_returns_none() {
        let cache = QueryCache::new(100);
        assert_eq!(cache.get(&QueryCache::key_for("nothing")), None);
    }

    #[test]
    fn keys_differ_per_text() {
        assert_ne!(QueryCache::key_for("a"), QueryCache::key_for("b"));
        assert_eq!(QueryCache::key_for("a").len(), 64);
    }
}
