//! Relevance selection: an external judge prunes the candidate list, with a
//! deterministic top-1 fallback whenever the judge cannot be used.

mod judge;
mod prompt;
mod selector;

pub use judge::{create_judge, OpenAiChatJudge};
pub use prompt::{build_user_prompt, parse_judge_response, PackedCandidate, Verdict, SYSTEM_PROMPT};
pub use selector::{RelevanceSelector, Selection, SelectionOutcome};
