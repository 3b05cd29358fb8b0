use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::MicroItem;

/// Which scorer produced a candidate's score.
///
/// Scores from different sources live on different scales and are never
/// compared with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Additive field-weighted term matches, unbounded.
    Lexical,
    /// Cosine similarity in [-1, 1].
    Semantic,
}

/// A MicroItem together with the relevance score assigned by one scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub item: Arc<MicroItem>,
    pub score: f64,
    pub source: ScoreSource,
}

impl Candidate {
    pub fn new(item: Arc<MicroItem>, score: f64, source: ScoreSource) -> Self {
        Self {
            item,
            score,
            source,
        }
    }
}
