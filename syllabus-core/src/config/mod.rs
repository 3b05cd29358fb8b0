//! Configuration system for Syllabus.
//! TOML-based, layered resolution: CLI > env > file > defaults.

pub mod corpus_config;
pub mod defaults;
pub mod embedding_config;
pub mod formatter_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod selector_config;
pub mod syllabus_config;

pub use corpus_config::CorpusConfig;
pub use embedding_config::EmbeddingConfig;
pub use formatter_config::FormatterConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use selector_config::SelectorConfig;
pub use syllabus_config::{CliOverrides, SyllabusConfig};
