//! Module listing: the lessons of module N with their links.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use syllabus_core::models::{ListedLesson, MicroItem, ModuleListing, ModuleListingOutcome};
use syllabus_core::text::normalize;

/// Module number inside a folded module title ("2 модуль: концепция").
static MODULE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*модул").unwrap());

/// Leading lesson number of a lesson title ("3 урок: Материалы").
static LESSON_INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(\d+)\s*урок").unwrap());

/// "модуль 2", "модуль №2", "модуля 2".
static REQUEST_AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"модул[а-я]*\s*(?:№\s*)?(\d+)\b").unwrap());

/// "2 модуль", "2-й модуль", "2ой модуль".
static REQUEST_BEFORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)(?:\s*-?\s*(?:й|ый|ой|ий)\b)?\s*модул").unwrap());

/// Whether a module title carries module number `n`.
pub fn module_matches(module_title: &str, n: u32) -> bool {
    let folded = normalize(module_title);
    MODULE_NUMBER_RE
        .captures_iter(&folded)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .any(|found| found == n)
}

/// Lesson number at the start of a lesson title.
pub fn lesson_index(lesson_title: &str) -> Option<u32> {
    LESSON_INDEX_RE
        .captures(lesson_title)
        .and_then(|caps| caps[1].parse().ok())
}

/// Module number requested by a free-form query, if it names one.
pub fn parse_module_request(query: &str) -> Option<u32> {
    let folded = normalize(query);
    // Leftmost mention wins.
    [&*REQUEST_AFTER_RE, &*REQUEST_BEFORE_RE]
        .into_iter()
        .filter_map(|re| re.captures(&folded))
        .min_by_key(|caps| caps.get(0).map_or(usize::MAX, |m| m.start()))
        .and_then(|caps| caps[1].parse().ok())
}

/// Lessons of module `n`, grouped by title and ordered by lesson number.
///
/// Lessons without a number go last, keeping first-seen order. The first
/// non-empty URL seen for a lesson wins.
pub fn list_lessons(items: &[Arc<MicroItem>], n: u32) -> ModuleListingOutcome {
    let mut module_title: Option<String> = None;
    let mut lessons: Vec<ListedLesson> = Vec::new();
    let mut by_title: HashMap<String, usize> = HashMap::new();

    for item in items.iter().filter(|item| module_matches(&item.module_title, n)) {
        let title = item.lesson_title.trim();
        if title.is_empty() {
            continue;
        }
        module_title.get_or_insert_with(|| item.module_title.trim().to_string());

        let url = item.lesson_url.trim();
        match by_title.get(title) {
            Some(&pos) => {
                let lesson = &mut lessons[pos];
                if lesson.url.is_none() && !url.is_empty() {
                    lesson.url = Some(url.to_string());
                }
            }
            None => {
                by_title.insert(title.to_string(), lessons.len());
                lessons.push(ListedLesson {
                    title: title.to_string(),
                    url: (!url.is_empty()).then(|| url.to_string()),
                    index: lesson_index(title),
                });
            }
        }
    }

    let Some(module_title) = module_title else {
        return ModuleListingOutcome::NotFound { module_number: n };
    };

    lessons.sort_by_key(|lesson| (lesson.index.is_none(), lesson.index));
    ModuleListingOutcome::Found(ModuleListing {
        module_number: n,
        module_title,
        lessons,
    })
}
