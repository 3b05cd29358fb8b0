//! Error taxonomy. One enum per subsystem, aggregated by [`SyllabusError`].

mod config_error;
mod corpus_error;
mod embedding_error;
mod judge_error;
mod retrieval_error;
mod syllabus_error;

pub use config_error::ConfigError;
pub use corpus_error::CorpusError;
pub use embedding_error::EmbeddingError;
pub use judge_error::JudgeError;
pub use retrieval_error::RetrievalError;
pub use syllabus_error::{SyllabusError, SyllabusResult};
