use super::{ConfigError, CorpusError, EmbeddingError, JudgeError, RetrievalError};

/// Top-level error for every Syllabus subsystem.
#[derive(Debug, thiserror::Error)]
pub enum SyllabusError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Judge(#[from] JudgeError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type SyllabusResult<T> = Result<T, SyllabusError>;
