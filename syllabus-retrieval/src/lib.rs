//! # syllabus-retrieval
//!
//! Query-time pipeline over an immutable knowledge snapshot:
//! candidates (semantic, falling back to lexical) → relevance selection
//! (LLM judge, falling back to top-1) → presentation record.
//!
//! [`KnowledgeBase`] owns the current snapshot and swaps it atomically on reload.

pub mod engine;
pub mod formatter;
pub mod listing;
pub mod search;
pub mod selection;

pub use engine::{KnowledgeBase, KnowledgeSnapshot, KnowledgeStats, LookupOutcome};
pub use formatter::PresentationFormatter;
pub use listing::{list_lessons, parse_module_request};
pub use search::{LexicalIndex, RetrievalChain, SemanticSearcher};
pub use selection::{OpenAiChatJudge, RelevanceSelector, Selection, SelectionOutcome};
