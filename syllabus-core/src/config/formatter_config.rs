use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Lessons emitted per display record.
    pub max_lessons: usize,
    /// Homework surfaced as a material name is cut to this many chars.
    pub homework_max_chars: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_lessons: defaults::DEFAULT_FORMATTER_MAX_LESSONS,
            homework_max_chars: defaults::DEFAULT_HOMEWORK_MAX_CHARS,
        }
    }
}
