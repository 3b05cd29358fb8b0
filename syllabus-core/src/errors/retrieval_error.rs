/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("candidate source {source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
}
