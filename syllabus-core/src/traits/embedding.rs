use crate::errors::SyllabusResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> SyllabusResult<Vec<f32>>;

    /// Embed a batch of texts, preserving input order.
    fn embed_batch(&self, texts: &[String]) -> SyllabusResult<Vec<Vec<f32>>>;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently usable (credentials present, not tripped).
    fn is_available(&self) -> bool;
}
