//! Candidate generation: lexical scoring, semantic search, and the
//! fallback chain that tries them in order.

pub mod chain;
pub mod lexical;
pub mod semantic;

pub use chain::{ChainOutcome, RetrievalChain};
pub use lexical::{LexicalIndex, LexicalWeights};
pub use semantic::SemanticSearcher;

use std::collections::HashSet;

use syllabus_core::models::Candidate;

/// Keep the first (highest-ranked) candidate per item key, up to `k`.
pub fn dedup_truncate(ranked: Vec<Candidate>, k: usize) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(k.min(ranked.len()));
    for candidate in ranked {
        if out.len() >= k {
            break;
        }
        if seen.insert(candidate.item.key()) {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use syllabus_core::models::{MicroItem, ScoreSource};

    use super::*;

    fn candidate(lesson_url: &str, material: &str, score: f64) -> Candidate {
        let item = MicroItem {
            course_title: String::new(),
            course_url: String::new(),
            step_title: String::new(),
            step_url: String::new(),
            module_title: String::new(),
            module_url: String::new(),
            lesson_title: "1 урок".into(),
            lesson_url: lesson_url.into(),
            section_title: "Раздел".into(),
            material_title: material.into(),
            homework: String::new(),
            lesson_blob: Arc::from(""),
            normalized_text: material.into(),
        };
        Candidate::new(Arc::new(item), score, ScoreSource::Lexical)
    }

    #[test]
    fn first_occurrence_wins() {
        let ranked = vec![
            candidate("u1", "a", 3.0),
            candidate("u1", "a", 2.0),
            candidate("u1", "b", 1.0),
        ];
        let out = dedup_truncate(ranked, 10);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].score, 3.0);
        assert_eq!(out[1].item.material_title, "b");
    }

    #[test]
    fn truncates_after_dedup() {
        let ranked = vec![
            candidate("u1", "a", 3.0),
            candidate("u1", "a", 2.5),
            candidate("u2", "a", 2.0),
            candidate("u3", "a", 1.0),
        ];
        let out = dedup_truncate(ranked, 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].item.lesson_url, "u2");
    }
}
