//! Judge prompt construction and response parsing.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use syllabus_core::errors::JudgeError;
use syllabus_core::models::Candidate;
use syllabus_core::text::char_prefix;

pub const SYSTEM_PROMPT: &str = "Ты — методист и куратор курса дизайна интерьера.\n\
Тебе дали вопрос студента и список кандидатов из базы знаний.\n\
Задача: выбрать до 3 самых релевантных кандидатов ПО СМЫСЛУ.\n\
Учитывай синонимы (ванная=санузел), формулировки в ДЗ, цель урока, и разделы.\n\
Если в базе НЕТ ничего подходящего — верни NONE.\n\
Верни ТОЛЬКО JSON без текста вокруг:\n\
{\"pick\":[1,5],\"reason\":\"...\"} или {\"pick\":[],\"reason\":\"NONE\"}\n";

/// One candidate as shown to the judge. `id` is 1-based.
#[derive(Debug, Serialize)]
pub struct PackedCandidate<'a> {
    pub id: usize,
    pub step: &'a str,
    pub module: &'a str,
    pub lesson: &'a str,
    pub section: &'a str,
    pub material: &'a str,
    pub url: &'a str,
    pub homework: &'a str,
    pub blob: &'a str,
}

impl<'a> PackedCandidate<'a> {
    pub fn new(id: usize, candidate: &'a Candidate, blob_chars: usize) -> Self {
        let item = &candidate.item;
        Self {
            id,
            step: &item.step_title,
            module: &item.module_title,
            lesson: &item.lesson_title,
            section: &item.section_title,
            material: &item.material_title,
            url: &item.lesson_url,
            homework: &item.homework,
            blob: char_prefix(&item.lesson_blob, blob_chars),
        }
    }
}

/// User prompt: the question followed by the packed candidate list.
pub fn build_user_prompt(
    query: &str,
    candidates: &[Candidate],
    blob_chars: usize,
) -> Result<String, serde_json::Error> {
    let packed: Vec<PackedCandidate<'_>> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| PackedCandidate::new(i + 1, c, blob_chars))
        .collect();
    let json = serde_json::to_string(&packed)?;
    Ok(format!("Вопрос студента:\n{query}\n\nКандидаты:\n{json}"))
}

/// Interpreted judge response. `picks` are 0-based, deduplicated, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub picks: Vec<usize>,
    pub reason: Option<String>,
}

/// Interpret a raw judge response against `shown` packed candidates.
///
/// Only the first `max_picks` entries of `pick` are considered; entries that
/// are not integers in `1..=shown` are ignored.
pub fn parse_judge_response(raw: &str, shown: usize, max_picks: usize) -> Result<Verdict, JudgeError> {
    let body = raw.trim();
    if body.is_empty() {
        return Err(JudgeError::EmptyResponse);
    }
    let object = extract_object(body).ok_or_else(|| JudgeError::MalformedResponse {
        reason: "no JSON object in response".to_string(),
    })?;
    let value: Value = serde_json::from_str(object).map_err(|e| JudgeError::MalformedResponse {
        reason: e.to_string(),
    })?;
    let Value::Object(map) = value else {
        return Err(JudgeError::MalformedResponse {
            reason: "response is not a JSON object".to_string(),
        });
    };

    let reason = map
        .get("reason")
        .and_then(Value::as_str)
        .map(str::to_string);

    let picks = match map.get("pick") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(raw_picks)) => {
            let mut seen = HashSet::new();
            raw_picks
                .iter()
                .take(max_picks)
                .filter_map(Value::as_u64)
                .filter_map(|id| usize::try_from(id).ok())
                .filter(|&id| (1..=shown).contains(&id))
                .map(|id| id - 1)
                .filter(|idx| seen.insert(*idx))
                .collect()
        }
        Some(other) => {
            return Err(JudgeError::MalformedResponse {
                reason: format!("`pick` is not a list: {other}"),
            })
        }
    };

    Ok(Verdict { picks, reason })
}

/// The outermost `{...}` span, tolerating code fences and chatter around it.
fn extract_object(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (end > start).then(|| &body[start..=end])
}
