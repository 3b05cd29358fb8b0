use crate::errors::SyllabusResult;
use crate::models::Candidate;

/// One strategy in the candidate-generation fallback chain.
pub trait ICandidateSource {
    /// Short name recorded in logs and degradation events.
    fn name(&self) -> &str;

    /// Ranked, deduplicated candidates, at most `k`.
    fn candidates(&self, query: &str, k: usize) -> SyllabusResult<Vec<Candidate>>;
}
