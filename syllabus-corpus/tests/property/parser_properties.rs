use proptest::prelude::*;

use syllabus_corpus::parse;

/// Lines drawn from the shapes a course document actually contains.
fn corpus_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("СТРУКТУРА КУРСА".to_string()),
        (1u32..4).prop_map(|n| format!("{n} ступень")),
        (1u32..4).prop_map(|n| format!("{n} модуль")),
        (1u32..6).prop_map(|n| format!("{n} урок: тема {n}")),
        (1u32..9).prop_map(|n| format!("Ссылка на урок: https://x.example/l/{n}")),
        "[а-я ]{1,20}".prop_map(|s| format!("ДЗ: {s}")),
        ("[а-я]{1,8}", "[а-я]{1,8}", "[а-я]{1,8}")
            .prop_map(|(t, a, b)| format!("Раздел «{t}»: {a}, {b}")),
        "https://x\\.example/[a-z]{1,5}",
        "\\PC{0,30}",
    ]
}

fn corpus() -> impl Strategy<Value = String> {
    prop::collection::vec(corpus_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn parse_never_panics(s in "\\PC{0,400}") {
        let _ = parse(&s);
    }

    #[test]
    fn parse_is_idempotent(text in corpus()) {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn every_item_has_a_lesson_and_material(text in corpus()) {
        for item in parse(&text) {
            prop_assert!(!item.lesson_title.is_empty());
            prop_assert!(!item.material_title.is_empty());
            prop_assert!(!item.normalized_text.is_empty());
        }
    }

    #[test]
    fn lesson_under_fresh_step_has_no_module(
        before in corpus(),
        sections in prop::collection::vec("[а-я]{1,8}", 0..3),
    ) {
        let mut text = before;
        text.push_str("\n9 ступень\n1 урок: после ступени\n");
        for s in &sections {
            text.push_str(&format!("Раздел «{s}»: м\n"));
        }
        let items = parse(&text);
        let last = items.last().expect("lesson after step");
        prop_assert_eq!(last.step_title.as_str(), "9 ступень");
        prop_assert_eq!(last.module_title.as_str(), "");
    }
}
