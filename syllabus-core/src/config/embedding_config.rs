use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "openai" or "none".
    pub provider: String,
    pub model: String,
    /// OpenAI-compatible API root, without the `/embeddings` suffix.
    pub base_url: String,
    /// Usually supplied through `OPENAI_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Inputs per request when building the side-car artifact.
    pub batch_size: usize,
    /// Max cached query embeddings.
    pub query_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: defaults::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}
