use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The atomic retrievable unit: one (lesson, section, material) triple with
/// the hierarchy it was found under.
///
/// `lesson_blob` is shared by every item of the same lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroItem {
    pub course_title: String,
    pub course_url: String,
    pub step_title: String,
    pub step_url: String,
    pub module_title: String,
    pub module_url: String,
    pub lesson_title: String,
    pub lesson_url: String,
    pub section_title: String,
    pub material_title: String,
    /// Homework text, empty when the lesson has none.
    pub homework: String,
    /// Raw section lines of the owning lesson, newline-joined.
    pub lesson_blob: Arc<str>,
    /// Folded concatenation of every textual field, used for lexical scoring.
    pub normalized_text: String,
}

/// Composite identity of a [`MicroItem`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub lesson: String,
    pub section: String,
    pub material: String,
}

impl MicroItem {
    /// Lesson identity: the URL when known, the title otherwise.
    pub fn lesson_key(&self) -> &str {
        let url = self.lesson_url.trim();
        if url.is_empty() {
            self.lesson_title.trim()
        } else {
            url
        }
    }

    /// Composite key used for candidate deduplication.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            lesson: self.lesson_key().to_string(),
            section: self.section_title.clone(),
            material: self.material_title.clone(),
        }
    }

    /// blake3 hash of `normalized_text`, used to pair side-car vectors with items.
    pub fn content_hash(&self) -> String {
        blake3::hash(self.normalized_text.as_bytes())
            .to_hex()
            .to_string()
    }
}
