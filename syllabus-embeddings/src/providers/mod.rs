//! Embedding provider implementations.

mod openai_provider;

pub use openai_provider::OpenAiEmbeddingProvider;

use syllabus_core::config::EmbeddingConfig;
use syllabus_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Create the configured provider.
///
/// Returns `None` for `provider = "none"`, or when the client cannot be built.
pub fn create_provider(config: &EmbeddingConfig) -> Option<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "none" => {
            info!("semantic search disabled by configuration");
            None
        }
        _ => match OpenAiEmbeddingProvider::new(config) {
            Ok(provider) => {
                if !provider.is_available() {
                    warn!("no API key configured, semantic search will fall back to lexical");
                }
                Some(Box::new(provider))
            }
            Err(e) => {
                warn!(error = %e, "failed to create embedding provider");
                None
            }
        },
    }
}
