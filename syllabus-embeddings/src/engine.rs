//! EmbeddingEngine: query augmentation, caching and the provider call.

use syllabus_core::config::EmbeddingConfig;
use syllabus_core::errors::{EmbeddingError, SyllabusResult};
use syllabus_core::synonyms::augment_for_embedding;
use syllabus_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::QueryCache;
use crate::providers;

/// Embeds user queries for semantic search.
///
/// The engine never decides about fallbacks: every failure is returned and
/// the retriever degrades to lexical scoring.
pub struct EmbeddingEngine {
    provider: Option<Box<dyn IEmbeddingProvider>>,
    cache: QueryCache,
    query_expansion: bool,
}

impl EmbeddingEngine {
    /// Create an engine from configuration.
    pub fn new(config: &EmbeddingConfig, query_expansion: bool) -> Self {
        let provider = providers::create_provider(config);
        info!(
            provider = provider.as_ref().map_or("none", |p| p.name()),
            model = %config.model,
            query_expansion,
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache: QueryCache::new(config.query_cache_size),
            query_expansion,
        }
    }

    /// Create an engine around an explicit provider.
    pub fn with_provider(
        provider: Box<dyn IEmbeddingProvider>,
        cache_size: u64,
        query_expansion: bool,
    ) -> Self {
        Self {
            provider: Some(provider),
            cache: QueryCache::new(cache_size),
            query_expansion,
        }
    }

    /// An engine without a provider. Every query fails and falls back.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            cache: QueryCache::new(1),
            query_expansion: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_available())
    }

    /// Name of the configured provider, `"none"` without one.
    pub fn active_provider(&self) -> &str {
        self.provider.as_ref().map_or("none", |p| p.name())
    }

    pub fn provider(&self) -> Option<&dyn IEmbeddingProvider> {
        self.provider.as_deref()
    }

    /// The text actually sent to the provider for `query`.
    pub fn query_text(&self, query: &str) -> String {
        if self.query_expansion {
            augment_for_embedding(query)
        } else {
            query.to_string()
        }
    }

    /// Embed a user query, using the cache when possible.
    pub fn embed_query(&self, query: &str) -> SyllabusResult<Vec<f32>> {
        let provider = match self.provider.as_ref() {
            Some(p) if p.is_available() => p,
            Some(p) => {
                return Err(EmbeddingError::ProviderUnavailable {
                    provider: p.name().to_string(),
                }
                .into())
            }
            None => {
                return Err(EmbeddingError::ProviderUnavailable {
                    provider: "none".to_string(),
                }
                .into())
            }
        };

        let text = self.query_text(query);
        let key = QueryCache::key_for(&text);
        if let Some(vec) = self.cache.get(&key) {
            debug!(%key, "query embedding cache hit");
            return Ok(vec);
        }

        let embedding = provider.embed(&text)?;
        if embedding.is_empty() {
            return Err(EmbeddingError::InferenceFailed {
                reason: "provider returned an empty vector".to_string(),
            }
            .into());
        }
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        seen: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl IEmbeddingProvider for CountingProvider {
        fn embed(&self, text: &str) -> SyllabusResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(text.to_string());
            Ok(vec![1.0, 0.0])
        }

        fn embed_batch(&self, texts: &[String]) -> SyllabusResult<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn engine(expansion: bool) -> (EmbeddingEngine, Arc<AtomicUsize>, Arc<std::sync::Mutex<Vec<String>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let provider = CountingProvider {
            calls: Arc::clone(&calls),
            seen: Arc::clone(&seen),
        };
        (
            EmbeddingEngine::with_provider(Box::new(provider), 16, expansion),
            calls,
            seen,
        )
    }

    #[test]
    fn embed_query_caches() {
        let (engine, calls, _) = engine(true);
        let a = engine.embed_query("3d коллаж").unwrap();
        let b = engine.embed_query("3d коллаж").unwrap();
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn query_is_augmented_before_embedding() {
        let (engine, _, seen) = engine(true);
        engine.embed_query("санузел в стиле лофт").unwrap();
        let sent = seen.lock().unwrap()[0].clone();
        assert!(sent.starts_with("санузел в стиле лофт"));
        assert!(sent.contains("Подсказка"));
    }

    #[test]
    fn expansion_can_be_disabled() {
        let (engine, _, seen) = engine(false);
        engine.embed_query("санузел").unwrap();
        assert_eq!(seen.lock().unwrap()[0], "санузел");
    }

    #[test]
    fn disabled_engine_fails() {
        let engine = EmbeddingEngine::disabled();
        assert!(!engine.is_available());
        assert_eq!(engine.active_provider(), "none");
        assert!(engine.embed_query("что угодно").is_err());
    }

    #[test]
    fn none_provider_from_config() {
        let config = EmbeddingConfig {
            provider: "none".into(),
            ..Default::default()
        };
        let engine = EmbeddingEngine::new(&config, true);
        assert!(engine.provider().is_none());
    }
}
