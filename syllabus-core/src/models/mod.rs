//! Data model shared by the parser, the retrievers and the formatter.

mod candidate;
mod degradation_event;
mod display;
mod listing;
mod micro_item;

pub use candidate::{Candidate, ScoreSource};
pub use degradation_event::DegradationEvent;
pub use display::{Breadcrumb, DisplayRecord, HierarchyLevel, LessonBlock};
pub use listing::{ListedLesson, ModuleListing, ModuleListingOutcome};
pub use micro_item::{ItemKey, MicroItem};
