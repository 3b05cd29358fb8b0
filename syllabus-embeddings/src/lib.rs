//! # syllabus-embeddings
//!
//! Everything vector-shaped: the OpenAI-compatible provider, the query
//! embedding cache, loading and aligning the side-car vector table, and
//! building that side-car from a parsed corpus.

pub mod builder;
pub mod cache;
pub mod engine;
pub mod providers;
pub mod similarity;
pub mod vector_table;

pub use builder::{build_vector_artifact, write_artifact, VectorArtifact};
pub use engine::EmbeddingEngine;
pub use providers::OpenAiEmbeddingProvider;
pub use vector_table::{Alignment, VectorTable};
