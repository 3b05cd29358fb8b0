/// Corpus loading errors.
///
/// These never escape the loader: they are folded into a load status so that a
/// missing or unreadable corpus yields an empty index instead of a failure.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus not found: {path}")]
    NotFound { path: String },

    #[error("corpus unreadable: {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
