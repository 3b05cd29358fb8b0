use serde::{Deserialize, Serialize};

use super::defaults;

/// Relevance selector (LLM judge) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// When false the selector always takes the deterministic top-1 path.
    pub enabled: bool,
    pub model: String,
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Candidates serialized into the judge prompt.
    pub max_candidates: usize,
    /// Picks honoured from the judge response.
    pub max_picks: usize,
    /// Prefix of `lesson_blob` included per candidate.
    pub blob_prefix_chars: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_SELECTOR_ENABLED,
            model: defaults::DEFAULT_SELECTOR_MODEL.to_string(),
            base_url: defaults::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
            max_candidates: defaults::DEFAULT_SELECTOR_MAX_CANDIDATES,
            max_picks: defaults::DEFAULT_SELECTOR_MAX_PICKS,
            blob_prefix_chars: defaults::DEFAULT_SELECTOR_BLOB_PREFIX_CHARS,
            temperature: defaults::DEFAULT_SELECTOR_TEMPERATURE,
            max_tokens: defaults::DEFAULT_SELECTOR_MAX_TOKENS,
        }
    }
}
