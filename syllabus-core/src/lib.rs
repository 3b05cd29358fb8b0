//! # syllabus-core
//!
//! Foundation crate for the Syllabus course knowledge-base retriever.
//! Defines the MicroItem model, candidate and display records, the error
//! taxonomy, configuration, provider traits, text folding and the shared
//! synonym table. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod synonyms;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SyllabusConfig;
pub use errors::{SyllabusError, SyllabusResult};
pub use models::{Candidate, ItemKey, MicroItem, ScoreSource};
