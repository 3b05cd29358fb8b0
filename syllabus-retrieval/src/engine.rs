//! KnowledgeBase: owns the current snapshot and runs the query pipeline.
//!
//! candidates (semantic → lexical) → select (judge → top-1) → format
//!
//! A snapshot is immutable once built. Reload builds a complete replacement
//! outside the lock and swaps the `Arc` under a short write lock, so readers
//! keep whatever snapshot they already hold.

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use syllabus_core::config::SyllabusConfig;
use syllabus_core::models::{Candidate, DegradationEvent, DisplayRecord, MicroItem, ModuleListingOutcome};
use syllabus_core::traits::IRelevanceJudge;
use syllabus_corpus::{load_corpus, CorpusStatus};
use syllabus_embeddings::{Alignment, EmbeddingEngine, VectorTable};
use tracing::{debug, info, warn};

use crate::formatter::PresentationFormatter;
use crate::listing;
use crate::search::{LexicalIndex, RetrievalChain, SemanticSearcher};
use crate::selection::{create_judge, RelevanceSelector, Selection, SelectionOutcome};

/// Degradation events kept for draining; older ones are discarded.
const MAX_PENDING_EVENTS: usize = 256;

/// Parsed items plus everything derived from them.
pub struct KnowledgeSnapshot {
    pub items: Vec<Arc<MicroItem>>,
    pub lexical: LexicalIndex,
    pub vectors: VectorTable,
    pub corpus_status: CorpusStatus,
    pub loaded_at: DateTime<Utc>,
}

impl KnowledgeSnapshot {
    pub fn build(items: Vec<MicroItem>, vectors: VectorTable, corpus_status: CorpusStatus) -> Self {
        let items: Vec<Arc<MicroItem>> = items.into_iter().map(Arc::new).collect();
        Self {
            lexical: LexicalIndex::new(items.clone()),
            items,
            vectors,
            corpus_status,
            loaded_at: Utc::now(),
        }
    }

    /// Snapshot of a knowledge base that has not been loaded yet.
    pub fn unloaded() -> Self {
        Self::build(Vec::new(), VectorTable::empty(), CorpusStatus::Empty)
    }
}

/// Summary of the current snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeStats {
    pub items: usize,
    pub lessons: usize,
    pub modules: usize,
    pub vectors_paired: usize,
    pub alignment: Alignment,
    pub corpus_status: CorpusStatus,
    pub embedding_provider: String,
    pub judge: String,
    pub loaded_at: DateTime<Utc>,
}

/// Result of a full lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(DisplayRecord),
    /// Candidates existed but the judge rejected all of them.
    NothingRelevant,
    NoCandidates,
}

pub struct KnowledgeBase {
    config: SyllabusConfig,
    embeddings: EmbeddingEngine,
    selector: RelevanceSelector,
    formatter: PresentationFormatter,
    snapshot: RwLock<Arc<KnowledgeSnapshot>>,
    events: Mutex<VecDeque<DegradationEvent>>,
}

impl KnowledgeBase {
    /// Build the providers from configuration. The snapshot starts empty.
    pub fn new(config: SyllabusConfig) -> Self {
        let embeddings = EmbeddingEngine::new(&config.embedding, config.retrieval.query_expansion);
        let judge = create_judge(&config.selector);
        Self::with_components(config, embeddings, judge)
    }

    /// Build around explicit collaborators.
    pub fn with_components(
        config: SyllabusConfig,
        embeddings: EmbeddingEngine,
        judge: Option<Arc<dyn IRelevanceJudge>>,
    ) -> Self {
        let selector = RelevanceSelector::new(judge, config.selector.clone());
        let formatter = PresentationFormatter::new(&config.formatter);
        Self {
            config,
            embeddings,
            selector,
            formatter,
            snapshot: RwLock::new(Arc::new(KnowledgeSnapshot::unloaded())),
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Build from configuration and load the corpus.
    pub fn load(config: SyllabusConfig) -> Self {
        let kb = Self::new(config);
        kb.reload();
        kb
    }

    pub fn config(&self) -> &SyllabusConfig {
        &self.config
    }

    /// Re-read the corpus and vector table and swap in the new snapshot.
    pub fn reload(&self) -> Arc<KnowledgeSnapshot> {
        let corpus = load_corpus(Path::new(&self.config.corpus.path));
        let vectors = self.load_vectors(&corpus.items);
        self.install_snapshot(corpus.items, vectors, corpus.status)
    }

    /// Swap in a snapshot built from already-parsed items.
    pub fn install_snapshot(
        &self,
        items: Vec<MicroItem>,
        vectors: VectorTable,
        corpus_status: CorpusStatus,
    ) -> Arc<KnowledgeSnapshot> {
        let fresh = Arc::new(KnowledgeSnapshot::build(items, vectors, corpus_status));
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&fresh);
        drop(guard);
        info!(
            items = fresh.items.len(),
            vectors = fresh.vectors.alignment().paired,
            status = %fresh.corpus_status,
            "knowledge snapshot installed"
        );
        fresh
    }

    fn load_vectors(&self, items: &[MicroItem]) -> VectorTable {
        let path = Path::new(&self.config.corpus.embeddings_path);
        if items.is_empty() {
            return VectorTable::empty();
        }
        if !path.exists() {
            info!(path = %path.display(), "no vector table, semantic search disabled");
            return VectorTable::empty();
        }
        match VectorTable::load(path, items, self.config.retrieval.require_checksums) {
            Ok(table) => table,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "vector table unusable, lexical scoring only");
                self.record(DegradationEvent::now("vector_table", e.to_string(), "lexical"));
                VectorTable::empty()
            }
        }
    }

    /// The current snapshot. Holding it keeps it alive across reloads.
    pub fn snapshot(&self) -> Arc<KnowledgeSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Semantic candidates when vectors and an embedding provider are
    /// available, lexical otherwise. `k` defaults to the configured size.
    pub fn kb_candidates(&self, query: &str, k: Option<usize>) -> Vec<Candidate> {
        let k = k.unwrap_or(self.config.retrieval.candidate_k);
        if query.trim().is_empty() || k == 0 {
            return Vec::new();
        }
        let snapshot = self.snapshot();

        let semantic = SemanticSearcher::new(
            &snapshot.items,
            &snapshot.vectors,
            &self.embeddings,
            &self.config.retrieval,
        );
        let mut chain = RetrievalChain::new();
        if !snapshot.vectors.is_empty() && self.embeddings.is_available() {
            chain.push(&semantic);
        } else {
            debug!(
                vectors = !snapshot.vectors.is_empty(),
                provider = self.embeddings.active_provider(),
                "semantic search skipped"
            );
        }
        chain.push(&snapshot.lexical);

        let outcome = chain.run(query, k);
        for event in outcome.events {
            self.record(event);
        }
        debug!(
            source = outcome.source.as_deref().unwrap_or("none"),
            count = outcome.candidates.len(),
            "candidates ready"
        );
        outcome.candidates
    }

    /// Lexical candidates only.
    pub fn kb_candidates_keyword(&self, query: &str, k: Option<usize>) -> Vec<Candidate> {
        let k = k.unwrap_or(self.config.retrieval.candidate_k);
        self.snapshot().lexical.search(query, k)
    }

    pub fn select(&self, query: &str, candidates: &[Candidate]) -> Selection {
        let selection = self.selector.select(query, candidates);
        if let Some(event) = selection.degradation() {
            self.record(event);
        }
        selection
    }

    pub fn format(&self, selected: &[Candidate], query: &str) -> DisplayRecord {
        self.formatter.format(selected, query)
    }

    /// Candidates, selection and formatting in one call.
    pub fn lookup(&self, query: &str) -> LookupOutcome {
        let candidates = self.kb_candidates(query, None);
        if candidates.is_empty() {
            return LookupOutcome::NoCandidates;
        }
        let selection = self.select(query, &candidates);
        if selection.outcome == SelectionOutcome::NothingRelevant {
            return LookupOutcome::NothingRelevant;
        }
        let record = self.format(&selection.chosen, query);
        if record.is_empty() {
            LookupOutcome::NothingRelevant
        } else {
            LookupOutcome::Found(record)
        }
    }

    pub fn list_lessons(&self, module_number: u32) -> ModuleListingOutcome {
        listing::list_lessons(&self.snapshot().items, module_number)
    }

    pub fn stats(&self) -> KnowledgeStats {
        let snapshot = self.snapshot();
        let lessons: HashSet<&str> = snapshot
            .items
            .iter()
            .map(|i| i.lesson_key())
            .filter(|k| !k.is_empty())
            .collect();
        let modules: HashSet<(&str, &str)> = snapshot
            .items
            .iter()
            .filter(|i| !i.module_title.trim().is_empty())
            .map(|i| (i.step_title.trim(), i.module_title.trim()))
            .collect();
        KnowledgeStats {
            items: snapshot.items.len(),
            lessons: lessons.len(),
            modules: modules.len(),
            vectors_paired: snapshot.vectors.alignment().paired,
            alignment: snapshot.vectors.alignment().clone(),
            corpus_status: snapshot.corpus_status.clone(),
            embedding_provider: self.embeddings.active_provider().to_string(),
            judge: self.selector.judge_name().to_string(),
            loaded_at: snapshot.loaded_at,
        }
    }

    /// Take every degradation event recorded since the last drain.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        events.drain(..).collect()
    }

    fn record(&self, event: DegradationEvent) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        if events.len() >= MAX_PENDING_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }
}
