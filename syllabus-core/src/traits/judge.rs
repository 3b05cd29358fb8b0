use crate::errors::SyllabusResult;

/// External structured-judgment call used to prune candidates.
///
/// Implementations return the raw response text; interpreting it is the
/// caller's job.
pub trait IRelevanceJudge: Send + Sync {
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> SyllabusResult<String>;

    fn name(&self) -> &str;
}
