//! Line classification. Every recognizer lives here so the scan only
//! dispatches on tags.

use std::sync::LazyLock;

use regex::Regex;
use syllabus_core::constants::URL_TRAILING_PUNCTUATION;

static COURSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*СТРУКТУРА\s+КУРСА").unwrap());

static STEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*\d+\s*ступен").unwrap());

static MODULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*\d+\s*модул").unwrap());

static LESSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\d+\s*урок\b").unwrap());

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(https?://\S+)").unwrap());

static LESSON_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Ссылка\s+на\s+урок|Ссылка)\s*:\s*(https?://\S+)").unwrap()
});

static HOMEWORK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*ДЗ(?:\s*\([^)]+\))?\s*:\s*(.+)$").unwrap());

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^Раздел\s*[«"']?([^»"':]+)[»"']?\s*:\s*(.+)$"#).unwrap()
});

/// Top-level classification of one corpus line. Payloads are trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    CourseHeader(&'a str),
    StepHeader(&'a str),
    ModuleHeader(&'a str),
    LessonHeader(&'a str),
    Content(&'a str),
}

impl<'a> LineKind<'a> {
    /// Classify a raw line. Headers are tried in course, step, module, lesson order.
    pub fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            Self::Blank
        } else if COURSE_RE.is_match(line) {
            Self::CourseHeader(line)
        } else if STEP_RE.is_match(line) {
            Self::StepHeader(line)
        } else if MODULE_RE.is_match(line) {
            Self::ModuleHeader(line)
        } else if LESSON_RE.is_match(line) {
            Self::LessonHeader(line)
        } else {
            Self::Content(line)
        }
    }

    pub fn is_header(&self) -> bool {
        !matches!(self, Self::Blank | Self::Content(_))
    }
}

/// Classification of a content line inside a lesson body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonLine<'a> {
    LessonUrl(String),
    Homework(&'a str),
    Section(&'a str),
}

impl<'a> LessonLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(caps) = LESSON_URL_RE.captures(line) {
            return Self::LessonUrl(clean_url(&caps[1]));
        }
        if let Some(m) = HOMEWORK_RE.captures(line).and_then(|c| c.get(1)) {
            return Self::Homework(m.as_str().trim());
        }
        Self::Section(line)
    }
}

/// A `Раздел «title»: material, material` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub title: String,
    pub materials: Vec<String>,
}

impl SectionSpec {
    pub fn parse(line: &str) -> Option<Self> {
        let caps = SECTION_RE.captures(line.trim())?;
        Some(Self {
            title: caps[1].trim().to_string(),
            materials: split_materials(caps[2].trim()),
        })
    }
}

/// First URL anywhere in the line, trailing punctuation removed.
pub fn find_url(line: &str) -> Option<String> {
    URL_RE.captures(line).map(|caps| clean_url(&caps[1]))
}

/// Split a comma-separated material list. Empty entries are dropped.
pub fn split_materials(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().trim_matches(|c| c == ' ' || c == '.' || c == ';'))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_url(url: &str) -> String {
    url.trim_end_matches(URL_TRAILING_PUNCTUATION).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_recognized_case_insensitively() {
        assert!(matches!(
            LineKind::classify("Структура курса «Дизайн»"),
            LineKind::CourseHeader(_)
        ));
        assert!(matches!(LineKind::classify("2 Ступень"), LineKind::StepHeader(_)));
        assert!(matches!(LineKind::classify(" 3модуль: Цвет"), LineKind::ModuleHeader(_)));
        assert!(matches!(LineKind::classify("12 урок: Свет"), LineKind::LessonHeader(_)));
    }

    #[test]
    fn lesson_marker_needs_word_boundary() {
        assert!(matches!(LineKind::classify("5 уроков по цвету"), LineKind::Content(_)));
    }

    #[test]
    fn blank_and_content() {
        assert_eq!(LineKind::classify("   \t"), LineKind::Blank);
        assert_eq!(LineKind::classify("  текст "), LineKind::Content("текст"));
    }

    #[test]
    fn lesson_url_line_strips_trailing_punctuation() {
        assert_eq!(
            LessonLine::classify("Ссылка на урок: https://x.example/l/1)."),
            LessonLine::LessonUrl("https://x.example/l/1".into())
        );
        assert_eq!(
            LessonLine::classify("ссылка: http://x.example/2;"),
            LessonLine::LessonUrl("http://x.example/2".into())
        );
    }

    #[test]
    fn homework_with_parenthesized_note() {
        assert_eq!(
            LessonLine::classify("ДЗ (по желанию): нарисовать план "),
            LessonLine::Homework("нарисовать план")
        );
        assert_eq!(LessonLine::classify("дз: план"), LessonLine::Homework("план"));
    }

    #[test]
    fn other_lines_are_sections() {
        assert_eq!(
            LessonLine::classify("Обзор стилей"),
            LessonLine::Section("Обзор стилей")
        );
    }

    #[test]
    fn section_with_guillemets() {
        let spec = SectionSpec::parse("Раздел «3D коллаж»: референсы, мудборд").unwrap();
        assert_eq!(spec.title, "3D коллаж");
        assert_eq!(spec.materials, vec!["референсы", "мудборд"]);
    }

    #[test]
    fn section_with_plain_quotes_and_punctuation() {
        let spec = SectionSpec::parse("раздел \"План\": обмер. ;, привязка;").unwrap();
        assert_eq!(spec.title, "План");
        assert_eq!(spec.materials, vec!["обмер", "привязка"]);
    }

    #[test]
    fn non_section_line() {
        assert!(SectionSpec::parse("Общие принципы: без раздела").is_none());
    }

    #[test]
    fn find_url_anywhere() {
        assert_eq!(
            find_url("смотри тут https://x.example/step,"),
            Some("https://x.example/step".into())
        );
        assert_eq!(find_url("без ссылки"), None);
    }
}
