/// Relevance judge errors.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("judge unavailable: {judge}")]
    Unavailable { judge: String },

    #[error("judge request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("judge returned an empty response")]
    EmptyResponse,

    #[error("judge response malformed: {reason}")]
    MalformedResponse { reason: String },
}
