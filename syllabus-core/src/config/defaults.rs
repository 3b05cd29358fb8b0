// Single source of truth for all default values.

// --- Corpus ---
pub const DEFAULT_CORPUS_PATH: &str = "knowledge/knowledge.txt";
pub const DEFAULT_EMBEDDINGS_PATH: &str = "knowledge/embeddings.json";
pub const DEFAULT_CONFIG_FILENAME: &str = "syllabus.toml";

// --- Providers ---
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 25;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "openai";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 2;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 128;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_000;

// --- Retrieval ---
pub const DEFAULT_CANDIDATE_K: usize = 20;
pub const DEFAULT_SEMANTIC_OVERFETCH: usize = 4;
pub const DEFAULT_SEMANTIC_MIN_POOL: usize = 40;
pub const DEFAULT_QUERY_EXPANSION: bool = true;
pub const DEFAULT_REQUIRE_CHECKSUMS: bool = false;

// --- Selector ---
pub const DEFAULT_SELECTOR_ENABLED: bool = true;
pub const DEFAULT_SELECTOR_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SELECTOR_MAX_CANDIDATES: usize = 20;
pub const DEFAULT_SELECTOR_MAX_PICKS: usize = 3;
pub const DEFAULT_SELECTOR_BLOB_PREFIX_CHARS: usize = 550;
pub const DEFAULT_SELECTOR_TEMPERATURE: f32 = 0.25;
pub const DEFAULT_SELECTOR_MAX_TOKENS: u32 = 350;

// --- Formatter ---
pub const DEFAULT_FORMATTER_MAX_LESSONS: usize = 3;
pub const DEFAULT_HOMEWORK_MAX_CHARS: usize = 240;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
