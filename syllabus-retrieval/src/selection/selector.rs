//! RelevanceSelector: judge call with a deterministic top-1 fallback.

use std::sync::Arc;

use serde::Serialize;
use syllabus_core::config::SelectorConfig;
use syllabus_core::constants::MAX_SELECTION_PICKS;
use syllabus_core::errors::SyllabusResult;
use syllabus_core::models::{Candidate, DegradationEvent};
use syllabus_core::traits::IRelevanceJudge;
use tracing::{debug, info, warn};

use super::prompt::{build_user_prompt, parse_judge_response, Verdict, SYSTEM_PROMPT};

/// How a selection was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// The judge picked at least one candidate.
    Judged,
    /// The judge answered that nothing is relevant.
    NothingRelevant,
    /// There was nothing to select from.
    NoCandidates,
    /// Selection is switched off; the top candidate is taken.
    Disabled,
    /// The judge could not be used; the top candidate is taken.
    Fallback { reason: String },
}

/// Chosen candidates, at most `max_picks` and never more than three.
#[derive(Debug, Clone)]
pub struct Selection {
    pub chosen: Vec<Candidate>,
    pub outcome: SelectionOutcome,
    /// Free-text reason reported by the judge.
    pub reason: Option<String>,
}

impl Selection {
    fn empty(outcome: SelectionOutcome) -> Self {
        Self {
            chosen: Vec::new(),
            outcome,
            reason: None,
        }
    }

    fn top_one(candidates: &[Candidate], outcome: SelectionOutcome) -> Self {
        Self {
            chosen: candidates.iter().take(1).cloned().collect(),
            outcome,
            reason: None,
        }
    }

    /// Degradation event for a fallback selection.
    pub fn degradation(&self) -> Option<DegradationEvent> {
        match &self.outcome {
            SelectionOutcome::Fallback { reason } => {
                Some(DegradationEvent::now("selector", reason.clone(), "top-1"))
            }
            _ => None,
        }
    }
}

/// Prunes a ranked candidate list down to the few the judge deems relevant.
pub struct RelevanceSelector {
    judge: Option<Arc<dyn IRelevanceJudge>>,
    config: SelectorConfig,
}

impl RelevanceSelector {
    pub fn new(judge: Option<Arc<dyn IRelevanceJudge>>, config: SelectorConfig) -> Self {
        Self { judge, config }
    }

    /// A selector that always takes the top candidate.
    pub fn top_one() -> Self {
        Self {
            judge: None,
            config: SelectorConfig {
                enabled: false,
                ..Default::default()
            },
        }
    }

    pub fn judge_name(&self) -> &str {
        self.judge.as_ref().map_or("none", |j| j.name())
    }

    pub fn select(&self, query: &str, candidates: &[Candidate]) -> Selection {
        if candidates.is_empty() {
            return Selection::empty(SelectionOutcome::NoCandidates);
        }
        if !self.config.enabled {
            return Selection::top_one(candidates, SelectionOutcome::Disabled);
        }
        let Some(judge) = self.judge.as_deref() else {
            return self.fall_back(candidates, "no judge configured".to_string());
        };

        let shown = &candidates[..candidates.len().min(self.config.max_candidates)];
        match self.ask(judge, query, shown) {
            Ok(verdict) if verdict.picks.is_empty() => {
                info!(judge = judge.name(), shown = shown.len(), "judge found nothing relevant");
                Selection {
                    chosen: Vec::new(),
                    outcome: SelectionOutcome::NothingRelevant,
                    reason: verdict.reason,
                }
            }
            Ok(verdict) => {
                debug!(judge = judge.name(), picks = ?verdict.picks, "judge selection");
                Selection {
                    chosen: verdict
                        .picks
                        .iter()
                        .take(MAX_SELECTION_PICKS)
                        .map(|&i| shown[i].clone())
                        .collect(),
                    outcome: SelectionOutcome::Judged,
                    reason: verdict.reason,
                }
            }
            Err(e) => self.fall_back(candidates, e.to_string()),
        }
    }

    fn ask(&self, judge: &dyn IRelevanceJudge, query: &str, shown: &[Candidate]) -> SyllabusResult<Verdict> {
        let user_prompt = build_user_prompt(query, shown, self.config.blob_prefix_chars)?;
        let raw = judge.complete(SYSTEM_PROMPT, &user_prompt)?;
        let max_picks = self.config.max_picks.min(MAX_SELECTION_PICKS);
        Ok(parse_judge_response(&raw, shown.len(), max_picks)?)
    }

    fn fall_back(&self, candidates: &[Candidate], reason: String) -> Selection {
        warn!(judge = self.judge_name(), %reason, "relevance judge failed, taking top candidate");
        Selection::top_one(candidates, SelectionOutcome::Fallback { reason })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use syllabus_core::errors::JudgeError;
    use syllabus_core::models::{MicroItem, ScoreSource};

    use super::*;

    struct Scripted {
        reply: SyllabusResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(JudgeError::RequestFailed {
                    reason: "timeout".into(),
                }
                .into()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    impl IRelevanceJudge for Scripted {
        fn complete(&self, _system: &str, user: &str) -> SyllabusResult<String> {
            self.prompts.lock().unwrap().push(user.to_string());
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(_) => Err(JudgeError::RequestFailed {
                    reason: "timeout".into(),
                }
                .into()),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| {
                let item = MicroItem {
                    course_title: String::new(),
                    course_url: String::new(),
                    step_title: String::new(),
                    step_url: String::new(),
                    module_title: String::new(),
                    module_url: String::new(),
                    lesson_title: format!("{} урок", i + 1),
                    lesson_url: format!("https://school.example/l/{i}"),
                    section_title: String::new(),
                    material_title: format!("материал {i}"),
                    homework: String::new(),
                    lesson_blob: Arc::from(""),
                    normalized_text: String::new(),
                };
                Candidate::new(Arc::new(item), (n - i) as f64, ScoreSource::Lexical)
            })
            .collect()
    }

    fn selector(judge: Arc<Scripted>) -> RelevanceSelector {
        let judge: Arc<dyn IRelevanceJudge> = judge;
        RelevanceSelector::new(Some(judge), SelectorConfig::default())
    }

    #[test]
    fn judged_picks_map_to_candidates() {
        let sel = selector(Scripted::ok(r#"{"pick":[3,1],"reason":"ok"}"#)).select("q", &candidates(5));
        assert_eq!(sel.outcome, SelectionOutcome::Judged);
        assert_eq!(sel.chosen.len(), 2);
        assert_eq!(sel.chosen[0].item.material_title, "материал 2");
        assert_eq!(sel.chosen[1].item.material_title, "материал 0");
        assert!(sel.degradation().is_none());
    }

    #[test]
    fn empty_pick_is_nothing_relevant() {
        let sel = selector(Scripted::ok(r#"{"pick":[],"reason":"NONE"}"#)).select("q", &candidates(5));
        assert_eq!(sel.outcome, SelectionOutcome::NothingRelevant);
        assert!(sel.chosen.is_empty());
        assert_eq!(sel.reason.as_deref(), Some("NONE"));
    }

    #[test]
    fn unparseable_reply_takes_exactly_top_one() {
        let sel = selector(Scripted::ok("конечно, вот ответ")).select("q", &candidates(5));
        assert!(matches!(sel.outcome, SelectionOutcome::Fallback { .. }));
        assert_eq!(sel.chosen.len(), 1);
        assert_eq!(sel.chosen[0].item.material_title, "материал 0");
        assert!(sel.degradation().is_some());
    }

    #[test]
    fn judge_error_takes_top_one() {
        let sel = selector(Scripted::failing()).select("q", &candidates(3));
        assert_eq!(sel.chosen.len(), 1);
        match sel.outcome {
            SelectionOutcome::Fallback { reason } => assert!(reason.contains("timeout")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn no_candidates_never_calls_judge() {
        let judge = Scripted::ok(r#"{"pick":[1]}"#);
        let sel = selector(Arc::clone(&judge)).select("q", &[]);
        assert_eq!(sel.outcome, SelectionOutcome::NoCandidates);
        assert!(judge.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn only_first_twenty_are_shown() {
        let judge = Scripted::ok(r#"{"pick":[21,20]}"#);
        let sel = selector(Arc::clone(&judge)).select("q", &candidates(25));
        assert_eq!(sel.chosen.len(), 1);
        assert_eq!(sel.chosen[0].item.material_title, "материал 19");
        let prompt = judge.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("\"id\":20"));
        assert!(!prompt.contains("\"id\":21"));
    }

    #[test]
    fn picks_never_exceed_three_even_when_configured_higher() {
        let judge: Arc<dyn IRelevanceJudge> = Scripted::ok(r#"{"pick":[1,2,3,4,5]}"#);
        let config = SelectorConfig {
            max_picks: 5,
            ..Default::default()
        };
        let sel = RelevanceSelector::new(Some(judge), config).select("q", &candidates(8));
        assert_eq!(sel.outcome, SelectionOutcome::Judged);
        assert_eq!(sel.chosen.len(), 3);
        assert_eq!(sel.chosen[2].item.material_title, "материал 2");
    }

    #[test]
    fn disabled_selector_takes_top_one() {
        let sel = RelevanceSelector::top_one().select("q", &candidates(4));
        assert_eq!(sel.outcome, SelectionOutcome::Disabled);
        assert_eq!(sel.chosen.len(), 1);
    }

    #[test]
    fn missing_judge_is_a_fallback() {
        let sel = RelevanceSelector::new(None, SelectorConfig::default()).select("q", &candidates(2));
        assert!(matches!(sel.outcome, SelectionOutcome::Fallback { .. }));
        assert_eq!(sel.chosen.len(), 1);
    }
}
