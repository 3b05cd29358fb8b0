use std::collections::HashSet;

use syllabus_core::constants::MATERIAL_NOT_SPECIFIED;
use syllabus_corpus::{load_corpus, parse, CorpusStatus};

#[test]
fn sample_course_item_count() {
    let items = parse(&test_fixtures::sample_course());
    // 5 + 3 + 3 + 2 + 2 + 3 + 1 placeholder
    assert_eq!(items.len(), 19);
}

#[test]
fn sample_course_hierarchy_is_copied_down() {
    let items = parse(&test_fixtures::sample_course());
    let collage = items
        .iter()
        .find(|it| it.material_title == "мудборд")
        .expect("collage material");
    assert_eq!(collage.course_title, "СТРУКТУРА КУРСА «Дизайн интерьера»");
    assert_eq!(collage.course_url, "https://school.example/course");
    assert_eq!(collage.step_title, "2 ступень: Визуализация");
    assert_eq!(collage.step_url, "");
    assert_eq!(collage.module_title, "1 модуль: Коллажи");
    assert_eq!(collage.section_title, "3D коллаж");
    assert_eq!(
        collage.homework,
        "собрать 3D коллаж ванной комнаты в стиле лофт"
    );
}

#[test]
fn header_urls_are_captured_and_cleaned() {
    let items = parse(&test_fixtures::sample_course());
    let first = &items[0];
    assert_eq!(first.step_url, "https://school.example/step/1");
    assert_eq!(first.module_url, "https://school.example/module/1");
    let kitchen = items
        .iter()
        .find(|it| it.lesson_title.starts_with("2 урок: Эргономика"))
        .unwrap();
    assert_eq!(kitchen.lesson_url, "https://school.example/lesson/102");
}

#[test]
fn trailing_period_is_stripped_from_materials() {
    let items = parse(&test_fixtures::sample_course());
    assert!(items.iter().any(|it| it.material_title == "блокнот обмеров"));
}

#[test]
fn placeholder_lesson_keeps_blob() {
    let items = parse(&test_fixtures::sample_course());
    let styles = items
        .iter()
        .find(|it| it.lesson_title == "3 урок: Стили")
        .unwrap();
    assert_eq!(styles.material_title, MATERIAL_NOT_SPECIFIED);
    assert!(styles.lesson_blob.contains("мемфис"));
    assert!(styles.lesson_url.is_empty());
}

#[test]
fn sample_course_keys_are_unique() {
    let items = parse(&test_fixtures::sample_course());
    let keys: HashSet<_> = items.iter().map(|it| it.key()).collect();
    assert_eq!(keys.len(), items.len());
}

#[test]
fn step_header_resets_module() {
    let items = parse(&test_fixtures::load_text("corpus/step_reset.txt"));
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].module_title, "1 модуль: Модуль первой ступени");
    assert_eq!(items[1].step_title, "2 ступень: Вторая");
    assert_eq!(items[1].module_title, "");
}

#[test]
fn document_without_headers_is_empty_not_error() {
    let items = parse(&test_fixtures::load_text("corpus/no_headers.txt"));
    assert!(items.is_empty());
}

#[test]
fn load_sample_course_from_disk() {
    let load = load_corpus(&test_fixtures::sample_course_path());
    assert_eq!(load.status, CorpusStatus::Loaded { items: 19 });
    assert_eq!(load.items, parse(&test_fixtures::sample_course()));
}

#[test]
fn crlf_line_endings_parse_the_same() {
    let text = test_fixtures::sample_course();
    let crlf = text.replace('\n', "\r\n");
    assert_eq!(parse(&crlf), parse(&text));
}
