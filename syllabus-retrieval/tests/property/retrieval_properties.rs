//! Property tests for candidate generation over the sample course.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use syllabus_core::config::SyllabusConfig;
use syllabus_core::models::MicroItem;
use syllabus_corpus::{parse, CorpusStatus};
use syllabus_embeddings::{EmbeddingEngine, VectorTable};
use syllabus_retrieval::search::lexical::LexicalQuery;
use syllabus_retrieval::{KnowledgeBase, LexicalIndex};

const WORDS: &[&str] = &[
    "коллаж",
    "3d",
    "ванная",
    "санузел",
    "плитка",
    "урок",
    "фотошоп",
    "слои",
    "зонирование",
    "кухня",
    "мемфис",
    "стиль",
    "обмерный",
    "план",
    "референсы",
    "лофт",
    "где",
    "как",
];

fn sample_items() -> Vec<MicroItem> {
    parse(&test_fixtures::sample_course())
}

fn sample_kb() -> KnowledgeBase {
    let kb = KnowledgeBase::with_components(
        SyllabusConfig::default(),
        EmbeddingEngine::disabled(),
        None,
    );
    let items = sample_items();
    let status = CorpusStatus::Loaded { items: items.len() };
    kb.install_snapshot(items, VectorTable::empty(), status);
    kb
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..5).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn candidate_keys_are_unique(query in query_strategy(), k in 1usize..30) {
        let kb = sample_kb();
        let candidates = kb.kb_candidates(&query, Some(k));
        prop_assert!(candidates.len() <= k);
        let keys: HashSet<_> = candidates.iter().map(|c| c.item.key()).collect();
        prop_assert_eq!(keys.len(), candidates.len());
    }

    #[test]
    fn scores_are_non_increasing(query in query_strategy()) {
        let kb = sample_kb();
        let candidates = kb.kb_candidates(&query, None);
        for pair in candidates.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn empty_table_matches_keyword_path(query in query_strategy()) {
        let kb = sample_kb();
        let hybrid: Vec<_> = kb
            .kb_candidates(&query, None)
            .iter()
            .map(|c| (c.item.key(), c.score))
            .collect();
        let keyword: Vec<_> = kb
            .kb_candidates_keyword(&query, None)
            .iter()
            .map(|c| (c.item.key(), c.score))
            .collect();
        prop_assert_eq!(hybrid, keyword);
    }

    #[test]
    fn adding_a_homework_word_never_lowers_the_score(
        query in query_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let items: Vec<Arc<MicroItem>> = sample_items().into_iter().map(Arc::new).collect();
        let with_homework: Vec<usize> = (0..items.len()).filter(|&i| !items[i].homework.trim().is_empty()).collect();
        let index = LexicalIndex::new(items.clone());
        let i = with_homework[pick.index(with_homework.len())];
        let word = items[i]
            .homework
            .split_whitespace()
            .max_by_key(|w| w.chars().count())
            .unwrap_or_default()
            .to_string();

        let base = index.score_at(i, &LexicalQuery::new(&query));
        let extended = index.score_at(i, &LexicalQuery::new(&format!("{query} {word}")));
        prop_assert!(extended >= base);
    }
}
