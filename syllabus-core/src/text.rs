//! Text folding shared by indexing and query processing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MIN_TERM_CHARS;

static QUOTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["'“”«»]"#).unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Alphanumeric runs over the folded Latin + Cyrillic alphabet.
static TERM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zа-я0-9]+").unwrap());

/// Fold text for matching: lowercase, `ё` → `е`, quotes removed, whitespace collapsed.
pub fn normalize(s: &str) -> String {
    let lowered = s.trim().to_lowercase().replace('ё', "е");
    let unquoted = QUOTES_RE.replace_all(&lowered, "");
    WHITESPACE_RE
        .replace_all(&unquoted, " ")
        .trim()
        .to_string()
}

/// Extract scoring terms from already-normalized text.
///
/// Terms are alphanumeric runs of at least [`MIN_TERM_CHARS`] chars,
/// deduplicated in first-seen order.
pub fn extract_terms(normalized: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    push_terms(normalized, &mut seen, &mut terms);
    terms
}

/// Append terms of `normalized` to `terms`, skipping anything already in `seen`.
pub fn push_terms(normalized: &str, seen: &mut HashSet<String>, terms: &mut Vec<String>) {
    for m in TERM_RE.find_iter(normalized) {
        let word = m.as_str();
        if word.chars().count() < MIN_TERM_CHARS {
            continue;
        }
        if seen.insert(word.to_string()) {
            terms.push(word.to_string());
        }
    }
}

/// Prefix of `s` holding at most `max_chars` chars.
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Whether `needle` occurs in `haystack` at the start of a word.
pub fn contains_word_prefix(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Whether `word` occurs in `haystack` as a whole word.
pub fn contains_whole_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(idx, m)| {
        let before_ok = haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[idx + m.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
