use serde::{Deserialize, Serialize};

use super::defaults;

/// Where the corpus and its side-car vector artifact live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Line-oriented UTF-8 course corpus.
    pub path: String,
    /// JSON side-car with one embedding per MicroItem.
    pub embeddings_path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_CORPUS_PATH.to_string(),
            embeddings_path: defaults::DEFAULT_EMBEDDINGS_PATH.to_string(),
        }
    }
}
