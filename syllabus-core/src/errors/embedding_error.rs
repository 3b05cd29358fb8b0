/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vector artifact unreadable: {path}: {reason}")]
    ArtifactIo { path: String, reason: String },

    #[error("vector artifact malformed: {reason}")]
    ArtifactMalformed { reason: String },

    #[error("vector table unavailable: {reason}")]
    TableUnavailable { reason: String },
}
