//! Single forward scan over classified lines.

use std::sync::Arc;

use syllabus_core::constants::MATERIAL_NOT_SPECIFIED;
use syllabus_core::models::MicroItem;
use syllabus_core::text::normalize;

use crate::cursor::HierarchyCursor;
use crate::line::{find_url, LessonLine, LineKind, SectionSpec};

/// Parse a course document into MicroItems, in document order.
///
/// Pure and deterministic. Malformed input never fails: lines that fit no
/// pattern are skipped or kept only in the lesson blob, and a lesson without
/// sections yields a single placeholder item.
pub fn parse(text: &str) -> Vec<MicroItem> {
    let lines: Vec<LineKind<'_>> = text.lines().map(LineKind::classify).collect();

    let mut cursor = HierarchyCursor::default();
    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match lines[i] {
            LineKind::Blank | LineKind::Content(_) => i += 1,
            LineKind::CourseHeader(title) => {
                let (url, next) = header_url(&lines, i);
                cursor = cursor.enter_course(title, url);
                i = next;
            }
            LineKind::StepHeader(title) => {
                let (url, next) = header_url(&lines, i);
                cursor = cursor.enter_step(title, url);
                i = next;
            }
            LineKind::ModuleHeader(title) => {
                let (url, next) = header_url(&lines, i);
                cursor = cursor.enter_module(title, url);
                i = next;
            }
            LineKind::LessonHeader(title) => {
                let (draft, next) = scan_lesson(&lines, i + 1, title);
                items.extend(draft.into_items(&cursor));
                i = next;
            }
        }
    }

    items
}

/// Peek past blank lines after the header at `at` for a content line with a URL.
///
/// Returns the URL, if any, and the index where the scan resumes.
fn header_url(lines: &[LineKind<'_>], at: usize) -> (Option<String>, usize) {
    let mut j = at + 1;
    while matches!(lines.get(j), Some(LineKind::Blank)) {
        j += 1;
    }
    match lines.get(j) {
        Some(LineKind::Content(line)) => match find_url(line) {
            Some(url) => (Some(url), j + 1),
            None => (None, at + 1),
        },
        _ => (None, at + 1),
    }
}

/// Body of one lesson, collected up to the next header.
struct LessonDraft<'a> {
    title: &'a str,
    url: String,
    homework: String,
    section_lines: Vec<&'a str>,
}

fn scan_lesson<'a>(lines: &[LineKind<'a>], start: usize, title: &'a str) -> (LessonDraft<'a>, usize) {
    let mut draft = LessonDraft {
        title,
        url: String::new(),
        homework: String::new(),
        section_lines: Vec::new(),
    };

    let mut j = start;
    while let Some(kind) = lines.get(j) {
        match *kind {
            LineKind::Blank => {}
            LineKind::Content(line) => match LessonLine::classify(line) {
                LessonLine::LessonUrl(url) => draft.url = url,
                LessonLine::Homework(text) => draft.homework = text.to_string(),
                LessonLine::Section(text) => draft.section_lines.push(text),
            },
            _ => break,
        }
        j += 1;
    }

    (draft, j)
}

impl LessonDraft<'_> {
    fn into_items(self, cursor: &HierarchyCursor) -> Vec<MicroItem> {
        let blob: Arc<str> = Arc::from(self.section_lines.join("\n").trim());

        let mut sections: Vec<SectionSpec> = self
            .section_lines
            .iter()
            .filter_map(|line| SectionSpec::parse(line))
            .collect();
        if sections.is_empty() {
            sections.push(SectionSpec {
                title: String::new(),
                materials: Vec::new(),
            });
        }

        let mut items = Vec::new();
        for section in sections {
            let materials = if section.materials.is_empty() {
                vec![MATERIAL_NOT_SPECIFIED.to_string()]
            } else {
                section.materials
            };
            for material in materials {
                let normalized_text = normalize(
                    &[
                        cursor.course.title.as_str(),
                        cursor.step.title.as_str(),
                        cursor.module.title.as_str(),
                        self.title,
                        section.title.as_str(),
                        material.as_str(),
                        &*blob,
                        self.homework.as_str(),
                    ]
                    .join(" "),
                );
                items.push(MicroItem {
                    course_title: cursor.course.title.clone(),
                    course_url: cursor.course.url.clone(),
                    step_title: cursor.step.title.clone(),
                    step_url: cursor.step.url.clone(),
                    module_title: cursor.module.title.clone(),
                    module_url: cursor.module.url.clone(),
                    lesson_title: self.title.to_string(),
                    lesson_url: self.url.clone(),
                    section_title: section.title.clone(),
                    material_title: material,
                    homework: self.homework.clone(),
                    lesson_blob: Arc::clone(&blob),
                    normalized_text,
                });
            }
        }
        items
    }
}
