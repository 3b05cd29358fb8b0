//! Field-weighted keyword scoring over normalized text.

use std::sync::Arc;

use syllabus_core::errors::SyllabusResult;
use syllabus_core::models::{Candidate, MicroItem, ScoreSource};
use syllabus_core::synonyms::{expanded_terms, matched_rules, FocusBonus};
use syllabus_core::text::normalize;
use syllabus_core::traits::ICandidateSource;
use tracing::debug;

use super::dedup_truncate;

/// Per-field weights, added once per query term found in the field.
#[derive(Debug, Clone)]
pub struct LexicalWeights {
    pub text: f64,
    pub material: f64,
    pub blob: f64,
    pub homework: f64,
}

impl Default for LexicalWeights {
    fn default() -> Self {
        Self {
            text: 1.0,
            material: 1.5,
            blob: 1.2,
            homework: 2.6,
        }
    }
}

/// Normalized fields of one item, folded once per snapshot.
struct LexicalDoc {
    material: String,
    blob: Arc<str>,
    homework: String,
}

/// Prepared query: expanded terms plus the focus bonuses of firing rules.
#[derive(Debug, Clone)]
pub struct LexicalQuery {
    pub terms: Vec<String>,
    pub focus: Vec<FocusBonus>,
}

impl LexicalQuery {
    pub fn new(query: &str) -> Self {
        let normalized = normalize(query);
        Self {
            terms: expanded_terms(&normalized),
            focus: matched_rules(&normalized)
                .into_iter()
                .filter_map(|rule| rule.focus)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.focus.is_empty()
    }
}

/// Lexical index over one snapshot's items.
pub struct LexicalIndex {
    items: Vec<Arc<MicroItem>>,
    docs: Vec<LexicalDoc>,
    weights: LexicalWeights,
}

impl LexicalIndex {
    pub fn new(items: Vec<Arc<MicroItem>>) -> Self {
        Self::with_weights(items, LexicalWeights::default())
    }

    pub fn with_weights(items: Vec<Arc<MicroItem>>, weights: LexicalWeights) -> Self {
        let mut docs: Vec<LexicalDoc> = Vec::with_capacity(items.len());
        let mut previous: Option<(&Arc<str>, Arc<str>)> = None;
        for item in &items {
            // Items of one lesson share their blob; fold it once.
            let blob = match previous {
                Some((raw, ref folded)) if Arc::ptr_eq(raw, &item.lesson_blob) => Arc::clone(folded),
                _ => Arc::from(normalize(&item.lesson_blob)),
            };
            previous = Some((&item.lesson_blob, Arc::clone(&blob)));
            docs.push(LexicalDoc {
                material: normalize(&item.material_title),
                blob,
                homework: normalize(&item.homework),
            });
        }
        Self {
            items,
            docs,
            weights,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Score of item `index` for a prepared query.
    pub fn score_at(&self, index: usize, query: &LexicalQuery) -> f64 {
        let (Some(item), Some(doc)) = (self.items.get(index), self.docs.get(index)) else {
            return 0.0;
        };
        let text = item.normalized_text.as_str();
        if text.is_empty() {
            return 0.0;
        }

        let w = &self.weights;
        let mut score = 0.0;
        for term in &query.terms {
            let term = term.as_str();
            if text.contains(term) {
                score += w.text;
            }
            if doc.material.contains(term) {
                score += w.material;
            }
            if doc.blob.contains(term) {
                score += w.blob;
            }
            if doc.homework.contains(term) {
                score += w.homework;
            }
        }
        for focus in &query.focus {
            if focus.tokens.iter().any(|t| text.contains(t)) {
                score += focus.bonus;
            }
        }
        score
    }

    /// Ranked, deduplicated candidates with a positive score, at most `k`.
    ///
    /// Ties keep document order.
    pub fn search(&self, query: &str, k: usize) -> Vec<Candidate> {
        if k == 0 || self.is_empty() || query.trim().is_empty() {
            return Vec::new();
        }
        let prepared = LexicalQuery::new(query);
        if prepared.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<Candidate> = (0..self.items.len())
            .filter_map(|i| {
                let score = self.score_at(i, &prepared);
                (score > 0.0)
                    .then(|| Candidate::new(Arc::clone(&self.items[i]), score, ScoreSource::Lexical))
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(terms = ?prepared.terms, matched = scored.len(), "lexical scoring done");
        dedup_truncate(scored, k)
    }
}

impl ICandidateSource for LexicalIndex {
    fn name(&self) -> &str {
        "lexical"
    }

    fn candidates(&self, query: &str, k: usize) -> SyllabusResult<Vec<Candidate>> {
        Ok(self.search(query, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(lesson: &str, material: &str, blob: &str, homework: &str) -> MicroItem {
        let normalized_text = normalize(&[lesson, material, blob, homework].join(" "));
        MicroItem {
            course_title: String::new(),
            course_url: String::new(),
            step_title: String::new(),
            step_url: String::new(),
            module_title: String::new(),
            module_url: String::new(),
            lesson_title: lesson.to_string(),
            lesson_url: String::new(),
            section_title: String::new(),
            material_title: material.to_string(),
            homework: homework.to_string(),
            lesson_blob: Arc::from(blob),
            normalized_text,
        }
    }

    fn index(items: Vec<MicroItem>) -> LexicalIndex {
        LexicalIndex::new(items.into_iter().map(Arc::new).collect())
    }

    #[test]
    fn field_weights_add_up() {
        let idx = index(vec![item("1 урок", "мудборд", "мудборд", "мудборд")]);
        let score = idx.score_at(0, &LexicalQuery::new("мудборд"));
        assert!((score - (1.0 + 1.5 + 1.2 + 2.6)).abs() < 1e-9);
    }

    #[test]
    fn short_terms_are_ignored() {
        let idx = index(vec![item("1 урок", "ок", "", "")]);
        assert!(idx.search("ок", 20).is_empty());
    }

    #[test]
    fn bathroom_bonus_applies_once() {
        let idx = index(vec![
            item("1 урок", "плитка", "", "подобрать плитку для санузла"),
            item("2 урок", "плитка", "", ""),
        ]);
        let q = LexicalQuery::new("ванная");
        let with_bath = idx.score_at(0, &q);
        let without = idx.score_at(1, &q);
        assert_eq!(without, 0.0);
        assert_eq!(with_bath, 3.0);
    }

    #[test]
    fn ties_keep_document_order() {
        let idx = index(vec![
            item("1 урок", "слои", "", ""),
            item("2 урок", "слои", "", ""),
        ]);
        let hits = idx.search("слои", 20);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].item.lesson_title, "1 урок");
    }

    #[test]
    fn higher_score_ranks_first() {
        let idx = index(vec![
            item("1 урок", "слои", "", ""),
            item("2 урок", "маски", "", "слои и маски"),
        ]);
        let hits = idx.search("слои", 20);
        assert_eq!(hits[0].item.lesson_title, "2 урок");
    }

    #[test]
    fn photoshop_synonym_reaches_ps_items() {
        let idx = index(vec![item("1 урок", "adobe photoshop", "", "")]);
        assert_eq!(idx.search("фотошоп", 20).len(), 1);
    }

    #[test]
    fn blob_fold_is_shared_within_lesson() {
        let shared: Arc<str> = Arc::from("Раздел «Ёлка»: шар");
        let mut a = item("1 урок", "шар", "", "");
        let mut b = item("1 урок", "гирлянда", "", "");
        a.lesson_blob = Arc::clone(&shared);
        b.lesson_blob = Arc::clone(&shared);
        let idx = index(vec![a, b]);
        assert!(Arc::ptr_eq(&idx.docs[0].blob, &idx.docs[1].blob));
        assert_eq!(&*idx.docs[0].blob, "раздел елка: шар");
    }

    #[test]
    fn empty_inputs() {
        let idx = index(vec![item("1 урок", "слои", "", "")]);
        assert!(idx.search("", 20).is_empty());
        assert!(idx.search("слои", 0).is_empty());
        assert!(index(Vec::new()).search("слои", 20).is_empty());
    }
}
