use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use syllabus_core::config::{CliOverrides, SyllabusConfig};
use syllabus_core::logging;
use syllabus_core::models::{Candidate, DegradationEvent, ModuleListingOutcome};
use syllabus_corpus::{load_corpus, CorpusStatus};
use syllabus_embeddings::providers::create_provider;
use syllabus_embeddings::{build_vector_artifact, write_artifact};
use syllabus_retrieval::{parse_module_request, KnowledgeBase, LookupOutcome};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "syllabus",
    version,
    about = "Find the course lessons that answer a student's question"
)]
struct Cli {
    /// TOML config file (defaults to ./syllabus.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Course corpus file
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Side-car vector artifact
    #[arg(long, global = true)]
    embeddings: Option<PathBuf>,

    /// Number of candidates to retrieve
    #[arg(short = 'k', long, global = true)]
    candidates_k: Option<usize>,

    /// Skip the relevance judge and take the top candidate
    #[arg(long, global = true, default_value_t = false)]
    no_judge: bool,

    /// Disable semantic search (lexical scoring only)
    #[arg(long, global = true, default_value_t = false)]
    no_embeddings: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a question with up to three lessons
    Query {
        /// The student's question
        text: String,
    },
    /// Show ranked candidates without selection
    Candidates {
        text: String,
        /// Lexical scoring only
        #[arg(long, default_value_t = false)]
        keyword: bool,
    },
    /// List the lessons of a module
    Module { number: u32 },
    /// Summarize the loaded corpus and vector table
    Stats,
    /// Embed every item and write the side-car vector artifact
    BuildEmbeddings {
        /// Output path (defaults to the configured embeddings path)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    outcome: QueryOutcome,
    degradation_events: Vec<DegradationEvent>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QueryOutcome {
    Lookup(LookupOutcome),
    Module(ModuleListingOutcome),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = CliOverrides {
        corpus_path: cli.corpus.clone(),
        embeddings_path: cli.embeddings.clone(),
        candidate_k: cli.candidates_k,
        no_judge: cli.no_judge,
        no_embeddings: cli.no_embeddings,
        log_level: cli.log_level.clone(),
    };
    let config = SyllabusConfig::load(cli.config.as_deref(), Some(&overrides))
        .context("failed to load configuration")?;
    logging::init_with(&config.observability);

    match &cli.command {
        Command::BuildEmbeddings { out } => build_embeddings(&config, out.as_deref()),
        Command::Query { text } => {
            let kb = KnowledgeBase::load(config);
            run_query(&kb, text, cli.json)
        }
        Command::Candidates { text, keyword } => {
            let kb = KnowledgeBase::load(config);
            let candidates = if *keyword {
                kb.kb_candidates_keyword(text, None)
            } else {
                kb.kb_candidates(text, None)
            };
            print_candidates(&candidates, cli.json)
        }
        Command::Module { number } => {
            let kb = KnowledgeBase::load(config);
            print_listing(&kb.list_lessons(*number), cli.json)
        }
        Command::Stats => {
            let kb = KnowledgeBase::load(config);
            let stats = kb.stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("corpus:     {}", stats.corpus_status);
                println!("items:      {}", stats.items);
                println!("lessons:    {}", stats.lessons);
                println!("modules:    {}", stats.modules);
                println!(
                    "vectors:    {} paired ({:?}, dim {})",
                    stats.vectors_paired, stats.alignment.mode, stats.alignment.dimensions
                );
                println!("embeddings: {}", stats.embedding_provider);
                println!("judge:      {}", stats.judge);
                println!("loaded at:  {}", stats.loaded_at.to_rfc3339());
            }
            Ok(())
        }
    }
}

/// Module requests ("модуль 2") are routed to the listing.
fn run_query(kb: &KnowledgeBase, text: &str, json: bool) -> Result<()> {
    let outcome = match parse_module_request(text) {
        Some(n) => QueryOutcome::Module(kb.list_lessons(n)),
        None => QueryOutcome::Lookup(kb.lookup(text)),
    };

    if json {
        let report = QueryReport {
            query: text,
            outcome,
            degradation_events: kb.drain_degradation_events(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match outcome {
        QueryOutcome::Module(listing) => print_listing(&listing, false)?,
        QueryOutcome::Lookup(LookupOutcome::Found(record)) => print!("{}", record.render_text()),
        QueryOutcome::Lookup(LookupOutcome::NothingRelevant) => {
            println!("В базе знаний нет подходящего урока.")
        }
        QueryOutcome::Lookup(LookupOutcome::NoCandidates) => {
            println!("По запросу ничего не найдено.")
        }
    }
    Ok(())
}

fn print_candidates(candidates: &[Candidate], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(candidates)?);
        return Ok(());
    }
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "{:>2}. [{:?} {:.3}] {} / {} / {}",
            i + 1,
            c.source,
            c.score,
            c.item.lesson_title,
            c.item.section_title,
            c.item.material_title
        );
    }
    Ok(())
}

fn print_listing(listing: &ModuleListingOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }
    match listing {
        ModuleListingOutcome::Found(listing) => print!("{}", listing.render_text()),
        ModuleListingOutcome::NotFound { module_number } => {
            println!("Модуль {module_number} не найден.")
        }
    }
    Ok(())
}

fn build_embeddings(config: &SyllabusConfig, out: Option<&Path>) -> Result<()> {
    let corpus = load_corpus(Path::new(&config.corpus.path));
    if !matches!(corpus.status, CorpusStatus::Loaded { .. }) {
        bail!("cannot build embeddings: {}", corpus.status);
    }
    let Some(provider) = create_provider(&config.embedding) else {
        bail!("embedding provider is disabled");
    };

    let artifact = build_vector_artifact(
        &corpus.items,
        provider.as_ref(),
        &config.embedding.model,
        config.embedding.batch_size,
    )
    .context("failed to embed corpus")?;

    let out = out.unwrap_or_else(|| Path::new(&config.corpus.embeddings_path));
    write_artifact(&artifact, out).context("failed to write vector artifact")?;
    info!(path = %out.display(), count = artifact.count, dim = artifact.dim, "vector artifact written");
    println!("wrote {} vectors (dim {}) to {}", artifact.count, artifact.dim, out.display());
    Ok(())
}
