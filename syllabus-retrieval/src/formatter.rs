//! Display records for selected candidates.

use std::collections::HashSet;

use syllabus_core::config::FormatterConfig;
use syllabus_core::constants::{ELLIPSIS, MATERIAL_FALLBACK, MATERIAL_KIND_VIDEO_LESSON};
use syllabus_core::models::{Breadcrumb, Candidate, DisplayRecord, HierarchyLevel, LessonBlock, MicroItem};
use syllabus_core::synonyms;
use syllabus_core::text::{char_prefix, normalize};

/// Turns the selector's picks into a [`DisplayRecord`], one block per lesson.
#[derive(Debug, Clone)]
pub struct PresentationFormatter {
    max_lessons: usize,
    homework_max_chars: usize,
}

impl Default for PresentationFormatter {
    fn default() -> Self {
        Self::new(&FormatterConfig::default())
    }
}

impl PresentationFormatter {
    pub fn new(config: &FormatterConfig) -> Self {
        Self {
            max_lessons: config.max_lessons,
            homework_max_chars: config.homework_max_chars,
        }
    }

    /// Dedupe by lesson, cap the count, and build one block per lesson.
    pub fn format(&self, selected: &[Candidate], query: &str) -> DisplayRecord {
        let prefers_homework = is_collage_query(query);
        let mut seen = HashSet::new();
        let lessons = selected
            .iter()
            .map(|c| c.item.as_ref())
            .filter(|item| {
                let key = item.lesson_key();
                !key.is_empty() && seen.insert(key.to_string())
            })
            .take(self.max_lessons)
            .map(|item| self.block(item, prefers_homework))
            .collect();

        DisplayRecord {
            query: query.to_string(),
            lessons,
        }
    }

    fn block(&self, item: &MicroItem, prefers_homework: bool) -> LessonBlock {
        let homework = item.homework.trim();
        LessonBlock {
            kind: MATERIAL_KIND_VIDEO_LESSON.to_string(),
            breadcrumbs: breadcrumbs(item),
            material_name: self.material_name(item, prefers_homework),
            url: non_empty(&item.lesson_url),
            homework: (!homework.is_empty()).then(|| homework.to_string()),
        }
    }

    /// Homework for collage-shaped queries, the material title otherwise.
    fn material_name(&self, item: &MicroItem, prefers_homework: bool) -> String {
        let homework = item.homework.trim();
        if prefers_homework && !homework.is_empty() {
            return truncate_with_ellipsis(homework, self.homework_max_chars);
        }
        let material = item.material_title.trim();
        if material.is_empty() {
            MATERIAL_FALLBACK.to_string()
        } else {
            material.to_string()
        }
    }
}

fn is_collage_query(query: &str) -> bool {
    synonyms::rule("collage").is_some_and(|rule| rule.matches(&normalize(query)))
}

fn breadcrumbs(item: &MicroItem) -> Vec<Breadcrumb> {
    [
        (HierarchyLevel::Step, &item.step_title),
        (HierarchyLevel::Module, &item.module_title),
        (HierarchyLevel::Lesson, &item.lesson_title),
        (HierarchyLevel::Section, &item.section_title),
    ]
    .into_iter()
    .filter_map(|(level, title)| {
        non_empty(title).map(|title| Breadcrumb { level, title })
    })
    .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    format!("{}{ELLIPSIS}", char_prefix(text, max_chars).trim_end())
}
