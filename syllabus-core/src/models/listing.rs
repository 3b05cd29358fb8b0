use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::constants::URL_NOT_SPECIFIED;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedLesson {
    pub title: String,
    pub url: Option<String>,
    /// Lesson number parsed from the title ("3 урок" → 3).
    pub index: Option<u32>,
}

/// Lessons of one module, ordered by lesson number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleListing {
    pub module_number: u32,
    pub module_title: String,
    pub lessons: Vec<ListedLesson>,
}

impl ModuleListing {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.module_title);
        for lesson in &self.lessons {
            let url = lesson.url.as_deref().unwrap_or(URL_NOT_SPECIFIED);
            let _ = writeln!(out, "— {} — {}", lesson.title, url);
        }
        out
    }
}

/// Result of a module listing request. `NotFound` is a normal outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModuleListingOutcome {
    Found(ModuleListing),
    NotFound { module_number: u32 },
}
