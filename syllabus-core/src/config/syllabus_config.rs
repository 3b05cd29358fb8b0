//! Top-level Syllabus configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    defaults, CorpusConfig, EmbeddingConfig, FormatterConfig, ObservabilityConfig,
    RetrievalConfig, SelectorConfig,
};
use crate::constants::MAX_SELECTION_PICKS;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SYLLABUS_*`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`)
/// 3. Config file (explicit path, or `syllabus.toml` in the working directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyllabusConfig {
    pub corpus: CorpusConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub selector: SelectorConfig,
    pub formatter: FormatterConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub corpus_path: Option<PathBuf>,
    pub embeddings_path: Option<PathBuf>,
    pub candidate_k: Option<usize>,
    /// Force the deterministic top-1 selector path.
    pub no_judge: bool,
    /// Skip the semantic source entirely.
    pub no_embeddings: bool,
    pub log_level: Option<String>,
}

impl SyllabusConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. Without one, `syllabus.toml` in the
    /// current directory is merged when present.
    pub fn load(
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(defaults::DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        if let Some(cli) = cli_overrides {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Read a TOML file. Unknown keys are ignored.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("retrieval.candidate_k", self.retrieval.candidate_k),
            ("retrieval.semantic_overfetch", self.retrieval.semantic_overfetch),
            ("embedding.batch_size", self.embedding.batch_size),
            ("selector.max_candidates", self.selector.max_candidates),
            ("selector.max_picks", self.selector.max_picks),
            ("formatter.max_lessons", self.formatter.max_lessons),
            ("formatter.homework_max_chars", self.formatter.homework_max_chars),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if self.selector.max_picks > MAX_SELECTION_PICKS {
            return Err(ConfigError::ValidationFailed {
                field: "selector.max_picks".to_string(),
                message: format!("must be at most {MAX_SELECTION_PICKS}"),
            });
        }
        if self.selector.max_picks > self.selector.max_candidates {
            return Err(ConfigError::ValidationFailed {
                field: "selector.max_picks".to_string(),
                message: "must not exceed selector.max_candidates".to_string(),
            });
        }
        if !matches!(self.embedding.provider.as_str(), "openai" | "none") {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.provider".to_string(),
                message: format!(
                    "unknown provider '{}', expected 'openai' or 'none'",
                    self.embedding.provider
                ),
            });
        }
        if !(0.0..=2.0).contains(&self.selector.temperature) {
            return Err(ConfigError::ValidationFailed {
                field: "selector.temperature".to_string(),
                message: "must be between 0.0 and 2.0".to_string(),
            });
        }
        if self.embedding.timeout_secs == 0 || self.selector.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Apply environment overrides read through `get`.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = get("SYLLABUS_CORPUS_PATH") {
            self.corpus.path = val;
        }
        if let Some(val) = get("SYLLABUS_EMBEDDINGS_PATH") {
            self.corpus.embeddings_path = val;
        }
        if let Some(val) = get("SYLLABUS_EMBEDDING_PROVIDER") {
            self.embedding.provider = val;
        }
        if let Some(val) = get("SYLLABUS_EMBEDDING_MODEL") {
            self.embedding.model = val;
        }
        if let Some(val) = get("SYLLABUS_SELECTOR_MODEL") {
            self.selector.model = val;
        }
        if let Some(val) = get("SYLLABUS_SELECTOR_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                self.selector.enabled = v;
            }
        }
        if let Some(val) = get("SYLLABUS_CANDIDATE_K") {
            if let Ok(v) = val.parse::<usize>() {
                self.retrieval.candidate_k = v;
            }
        }
        if let Some(val) = get("SYLLABUS_LOG_LEVEL") {
            self.observability.log_level = val;
        }
        if let Some(val) = get("OPENAI_BASE_URL") {
            self.embedding.base_url = val.clone();
            self.selector.base_url = val;
        }
        if let Some(key) = get("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            if self.embedding.api_key.is_none() {
                self.embedding.api_key = Some(key.clone());
            }
            if self.selector.api_key.is_none() {
                self.selector.api_key = Some(key);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(ref p) = cli.corpus_path {
            self.corpus.path = p.display().to_string();
        }
        if let Some(ref p) = cli.embeddings_path {
            self.corpus.embeddings_path = p.display().to_string();
        }
        if let Some(k) = cli.candidate_k {
            self.retrieval.candidate_k = k;
        }
        if cli.no_judge {
            self.selector.enabled = false;
        }
        if cli.no_embeddings {
            self.embedding.provider = "none".to_string();
        }
        if let Some(ref level) = cli.log_level {
            self.observability.log_level = level.clone();
        }
    }

    /// Serialize the config to a TOML string. API keys are never written.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialize>".to_string(),
            message: e.to_string(),
        })
    }
}
