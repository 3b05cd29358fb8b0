//! # syllabus-corpus
//!
//! Turns a flat, loosely structured course document into an ordered list of
//! [`MicroItem`](syllabus_core::MicroItem)s.
//!
//! Lines are classified once into [`LineKind`]s, then a single forward scan
//! threads a [`HierarchyCursor`] (course, step, module) through them and
//! emits one item per (lesson, section, material) triple.

pub mod cursor;
pub mod line;
pub mod loader;
pub mod parser;

pub use cursor::HierarchyCursor;
pub use line::{LessonLine, LineKind, SectionSpec};
pub use loader::{load_corpus, read_corpus, CorpusLoad, CorpusStatus};
pub use parser::parse;
