//! Seams to the off-process collaborators and between retrieval stages.

mod candidate_source;
mod embedding;
mod judge;

pub use candidate_source::ICandidateSource;
pub use embedding::IEmbeddingProvider;
pub use judge::IRelevanceJudge;
