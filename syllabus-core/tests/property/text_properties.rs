use proptest::prelude::*;

use syllabus_core::synonyms::{augment_for_embedding, expanded_terms};
use syllabus_core::text::{char_prefix, extract_terms, normalize};

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,80}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_folds_yo_and_whitespace(s in "[А-Яа-яЁё \\t\\n]{0,60}") {
        let n = normalize(&s);
        prop_assert!(!n.contains('ё'));
        prop_assert!(!n.contains("  "));
        prop_assert_eq!(n.trim(), n.as_str());
    }

    #[test]
    fn terms_are_long_and_unique(s in "[a-zа-я0-9 ]{0,80}") {
        let terms = extract_terms(&s);
        let mut seen = std::collections::HashSet::new();
        for t in &terms {
            prop_assert!(t.chars().count() >= 3);
            prop_assert!(seen.insert(t.clone()));
        }
    }

    #[test]
    fn char_prefix_respects_limit(s in "\\PC{0,40}", n in 0usize..50) {
        let p = char_prefix(&s, n);
        prop_assert!(p.chars().count() <= n);
        prop_assert!(s.starts_with(p));
    }

    #[test]
    fn expansion_keeps_query_terms_first(s in "[a-zа-я ]{0,60}") {
        let base = extract_terms(&s);
        let expanded = expanded_terms(&s);
        prop_assert!(expanded.len() >= base.len());
        prop_assert_eq!(&expanded[..base.len()], &base[..]);
    }

    #[test]
    fn augmented_query_starts_with_query(s in "\\PC{0,40}") {
        prop_assert!(augment_for_embedding(&s).starts_with(s.trim()));
    }
}
