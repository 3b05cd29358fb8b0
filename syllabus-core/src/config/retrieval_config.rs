use serde::{Deserialize, Serialize};

use super::defaults;

/// Candidate generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of candidates handed to the selector.
    pub candidate_k: usize,
    /// Semantic pool = max(k * overfetch, min_pool) before deduplication.
    pub semantic_overfetch: usize,
    pub semantic_min_pool: usize,
    /// Append synonym hints to the query before embedding.
    pub query_expansion: bool,
    /// Refuse side-car artifacts whose records carry no checksums.
    pub require_checksums: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            candidate_k: defaults::DEFAULT_CANDIDATE_K,
            semantic_overfetch: defaults::DEFAULT_SEMANTIC_OVERFETCH,
            semantic_min_pool: defaults::DEFAULT_SEMANTIC_MIN_POOL,
            query_expansion: defaults::DEFAULT_QUERY_EXPANSION,
            require_checksums: defaults::DEFAULT_REQUIRE_CHECKSUMS,
        }
    }
}

impl RetrievalConfig {
    /// Size of the over-fetched semantic pool for a request of `k`.
    pub fn semantic_pool(&self, k: usize) -> usize {
        k.saturating_mul(self.semantic_overfetch)
            .max(self.semantic_min_pool)
    }
}
