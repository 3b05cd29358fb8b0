//! Cosine search over the side-car vector table.

use std::sync::Arc;

use syllabus_core::config::RetrievalConfig;
use syllabus_core::errors::{EmbeddingError, SyllabusResult};
use syllabus_core::models::{Candidate, MicroItem, ScoreSource};
use syllabus_core::traits::ICandidateSource;
use syllabus_embeddings::{EmbeddingEngine, VectorTable};
use tracing::debug;

use super::dedup_truncate;

/// Semantic candidate source borrowing one snapshot's items and vectors.
pub struct SemanticSearcher<'a> {
    items: &'a [Arc<MicroItem>],
    table: &'a VectorTable,
    engine: &'a EmbeddingEngine,
    config: &'a RetrievalConfig,
}

impl<'a> SemanticSearcher<'a> {
    pub fn new(
        items: &'a [Arc<MicroItem>],
        table: &'a VectorTable,
        engine: &'a EmbeddingEngine,
        config: &'a RetrievalConfig,
    ) -> Self {
        Self {
            items,
            table,
            engine,
            config,
        }
    }

    /// Over-fetch `max(k * overfetch, min_pool)` neighbours, then dedup to `k`.
    pub fn search(&self, query: &str, k: usize) -> SyllabusResult<Vec<Candidate>> {
        if self.table.is_empty() {
            return Err(EmbeddingError::TableUnavailable {
                reason: "no vectors loaded".to_string(),
            }
            .into());
        }
        if k == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.engine.embed_query(query)?;
        let pool = self.config.semantic_pool(k);
        let neighbours = self.table.nearest(&query_vec, pool)?;
        debug!(pool, found = neighbours.len(), "semantic neighbours");

        let ranked: Vec<Candidate> = neighbours
            .into_iter()
            .filter_map(|(idx, sim)| {
                self.items
                    .get(idx)
                    .map(|item| Candidate::new(Arc::clone(item), f64::from(sim), ScoreSource::Semantic))
            })
            .collect();
        Ok(dedup_truncate(ranked, k))
    }
}

impl ICandidateSource for SemanticSearcher<'_> {
    fn name(&self) -> &str {
        "semantic"
    }

    fn candidates(&self, query: &str, k: usize) -> SyllabusResult<Vec<Candidate>> {
        self.search(query, k)
    }
}
