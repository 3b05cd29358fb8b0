use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Hierarchy level shown in a breadcrumb trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyLevel {
    Step,
    Module,
    Lesson,
    Section,
}

impl HierarchyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Step => "Ступень",
            Self::Module => "Модуль",
            Self::Lesson => "Урок",
            Self::Section => "Раздел",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub level: HierarchyLevel,
    pub title: String,
}

/// One lesson in a rendered selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonBlock {
    pub kind: String,
    /// Only the non-empty hierarchy levels, outermost first.
    pub breadcrumbs: Vec<Breadcrumb>,
    pub material_name: String,
    pub url: Option<String>,
    pub homework: Option<String>,
}

/// Structured display record handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub query: String,
    pub lessons: Vec<LessonBlock>,
}

impl DisplayRecord {
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Plain line-oriented rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, lesson) in self.lessons.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "Материал: {}", lesson.kind);
            for crumb in &lesson.breadcrumbs {
                let _ = writeln!(out, "  {}: {}", crumb.level.label(), crumb.title);
            }
            let _ = writeln!(out, "Название материала: {}", lesson.material_name);
            if let Some(url) = &lesson.url {
                let _ = writeln!(out, "Ссылка: {url}");
            }
            if let Some(homework) = &lesson.homework {
                let _ = writeln!(out, "Домашнее задание: {homework}");
            }
        }
        out
    }
}
