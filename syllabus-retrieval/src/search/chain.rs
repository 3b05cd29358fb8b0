//! Ordered fallback over candidate sources.
//!
//! Sources are tried in priority order. A source that fails or comes back
//! empty is logged, recorded as a `DegradationEvent`, and the next one runs.

use syllabus_core::errors::RetrievalError;
use syllabus_core::models::{Candidate, DegradationEvent};
use syllabus_core::traits::ICandidateSource;
use tracing::{debug, warn};

/// Result of running the chain.
#[derive(Debug, Default)]
pub struct ChainOutcome {
    pub candidates: Vec<Candidate>,
    /// Source that produced the candidates, `None` when all came back empty.
    pub source: Option<String>,
    pub events: Vec<DegradationEvent>,
}

/// Candidate sources in priority order.
#[derive(Default)]
pub struct RetrievalChain<'a> {
    sources: Vec<&'a dyn ICandidateSource>,
}

impl<'a> RetrievalChain<'a> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source to the end of the chain.
    pub fn push(&mut self, source: &'a dyn ICandidateSource) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Run sources in order until one yields candidates.
    pub fn run(&self, query: &str, k: usize) -> ChainOutcome {
        let mut events = Vec::new();

        for (i, source) in self.sources.iter().enumerate() {
            let next = self
                .sources
                .get(i + 1)
                .map_or("none", |s| s.name());

            match source.candidates(query, k) {
                Ok(candidates) if !candidates.is_empty() => {
                    debug!(source = source.name(), count = candidates.len(), "candidates found");
                    return ChainOutcome {
                        candidates,
                        source: Some(source.name().to_string()),
                        events,
                    };
                }
                Ok(_) => {
                    if i + 1 < self.sources.len() {
                        debug!(source = source.name(), next, "source returned nothing, trying next");
                        events.push(DegradationEvent::now(
                            "retrieval",
                            format!("{} returned no candidates", source.name()),
                            next,
                        ));
                    }
                }
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        next,
                        "candidate source failed, trying next in chain"
                    );
                    let failure = RetrievalError::SourceUnavailable {
                        source_name: source.name().to_string(),
                        reason: e.to_string(),
                    };
                    events.push(DegradationEvent::now("retrieval", failure.to_string(), next));
                }
            }
        }

        ChainOutcome {
            candidates: Vec::new(),
            source: None,
            events,
        }
    }
}
