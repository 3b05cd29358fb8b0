//! The shared domain synonym table.
//!
//! One table drives both retrieval paths: the lexical scorer injects the
//! expansions as extra terms, the semantic path appends the hints as a visible
//! annotation before embedding the query.

use std::collections::HashSet;

use crate::text::{self, contains_whole_word, contains_word_prefix};

/// Extra score granted when a rule fires and the item mentions one of its tokens.
#[derive(Debug, Clone, Copy)]
pub struct FocusBonus {
    pub tokens: &'static [&'static str],
    pub bonus: f64,
}

/// One synonym group.
#[derive(Debug, Clone, Copy)]
pub struct SynonymRule {
    pub name: &'static str,
    /// Fire when a query word starts with one of these.
    pub prefixes: &'static [&'static str],
    /// Fire when one of these appears as a whole word.
    pub words: &'static [&'static str],
    /// Terms appended to the lexical query.
    pub expansions: &'static [&'static str],
    /// Annotation appended to the query before embedding.
    pub hint: &'static str,
    pub focus: Option<FocusBonus>,
}

impl SynonymRule {
    /// Whether the rule fires for an already-normalized query.
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.prefixes
            .iter()
            .any(|p| contains_word_prefix(normalized_query, p))
            || self
                .words
                .iter()
                .any(|w| contains_whole_word(normalized_query, w))
    }
}

pub const SYNONYM_RULES: &[SynonymRule] = &[
    SynonymRule {
        name: "bathroom",
        prefixes: &["ванн", "сануз", "туалет", "bathroom", "toilet"],
        words: &["wc"],
        expansions: &["санузел", "санузлы", "туалет", "ванная", "ванна"],
        hint: "ванная = санузел = туалет (bathroom, WC, toilet)",
        focus: Some(FocusBonus {
            tokens: &["сануз", "ванн", "туалет"],
            bonus: 3.0,
        }),
    },
    SynonymRule {
        name: "collage",
        prefixes: &["3d", "3д", "коллаж", "collage", "мудборд", "moodboard"],
        words: &[],
        expansions: &[
            "3д",
            "3d",
            "коллаж",
            "3д коллаж",
            "3d коллаж",
            "3д коллажа",
            "3d коллажа",
            "мудборд",
            "концепт-коллаж",
        ],
        hint: "3D = 3д = 3д коллаж = концепт-коллаж = мудборд (3D collage, moodboard)",
        focus: None,
    },
    SynonymRule {
        name: "photoshop",
        prefixes: &["photoshop", "фотошоп"],
        words: &["ps"],
        expansions: &["ps", "adobe photoshop", "photoshop", "фотошоп"],
        hint: "фотошоп = Photoshop = PS (Adobe Photoshop)",
        focus: None,
    },
    SynonymRule {
        name: "mid_century",
        prefixes: &[
            "mid-century",
            "midcentury",
            "mid century",
            "мидсенчури",
            "мид-сенчури",
            "мид сенчури",
            "середины века",
            "середина века",
        ],
        words: &[],
        expansions: &["mid-century", "midcentury", "мидсенчури", "мид-сенчури", "середины века"],
        hint: "мид-сенчури = mid-century modern = стиль середины века",
        focus: None,
    },
    SynonymRule {
        name: "eco",
        prefixes: &["экостил", "эко-стил", "экологичн", "eco-style"],
        words: &["эко", "eco"],
        expansions: &["эко", "eco", "экостиль", "эко-стиль", "натуральные материалы"],
        hint: "эко = экостиль (eco style, натуральные материалы)",
        focus: None,
    },
    SynonymRule {
        name: "mediterranean",
        prefixes: &["средиземномор", "mediterranean"],
        words: &[],
        expansions: &["средиземноморский", "средиземноморье", "mediterranean"],
        hint: "средиземноморский стиль = mediterranean style",
        focus: None,
    },
    SynonymRule {
        name: "memphis",
        prefixes: &["мемфис", "memphis"],
        words: &[],
        expansions: &["мемфис", "memphis"],
        hint: "мемфис = Memphis style",
        focus: None,
    },
];

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static SynonymRule> {
    SYNONYM_RULES.iter().find(|r| r.name == name)
}

/// Rules firing for an already-normalized query, in table order.
pub fn matched_rules(normalized_query: &str) -> Vec<&'static SynonymRule> {
    SYNONYM_RULES
        .iter()
        .filter(|rule| rule.matches(normalized_query))
        .collect()
}

/// Lexical terms for a normalized query: its own terms first, then the
/// expansion terms of every firing rule, deduplicated in first-seen order.
pub fn expanded_terms(normalized_query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    text::push_terms(normalized_query, &mut seen, &mut terms);
    for rule in matched_rules(normalized_query) {
        for expansion in rule.expansions {
            text::push_terms(&text::normalize(expansion), &mut seen, &mut terms);
        }
    }
    terms
}

/// Append the hint block of every firing rule to the raw query.
///
/// Returns the query unchanged when no rule fires.
pub fn augment_for_embedding(query: &str) -> String {
    let rules = matched_rules(&text::normalize(query));
    if rules.is_empty() {
        return query.to_string();
    }
    let hints: Vec<&str> = rules.iter().map(|r| r.hint).collect();
    format!(
        "{}\n\nПодсказка (синонимы и перевод): {}",
        query.trim(),
        hints.join("; ")
    )
}
