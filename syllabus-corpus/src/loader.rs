//! Reading the corpus from disk. Loading never fails; problems become a status.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use syllabus_core::errors::CorpusError;
use syllabus_core::models::MicroItem;
use tracing::{info, warn};

use crate::parser::parse;

/// Outcome of loading a corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorpusStatus {
    Loaded { items: usize },
    Missing { path: String },
    Unreadable { path: String, reason: String },
    /// The file exists but holds no text.
    Empty,
}

impl fmt::Display for CorpusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { items } => write!(f, "OK ({items} items)"),
            Self::Missing { path } => write!(f, "corpus not found: {path}"),
            Self::Unreadable { path, reason } => write!(f, "corpus unreadable: {path}: {reason}"),
            Self::Empty => write!(f, "corpus empty"),
        }
    }
}

/// Parsed items together with the load status.
#[derive(Debug, Clone)]
pub struct CorpusLoad {
    pub items: Vec<MicroItem>,
    pub status: CorpusStatus,
}

impl CorpusLoad {
    fn without_items(status: CorpusStatus) -> Self {
        Self {
            items: Vec::new(),
            status,
        }
    }
}

/// Read the corpus as UTF-8, replacing invalid sequences.
pub fn read_corpus(path: &Path) -> Result<String, CorpusError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CorpusError::NotFound {
            path: path.display().to_string(),
        },
        _ => CorpusError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load and parse the corpus at `path`.
pub fn load_corpus(path: &Path) -> CorpusLoad {
    let text = match read_corpus(path) {
        Ok(text) => text,
        Err(CorpusError::NotFound { path }) => {
            warn!(%path, "corpus file missing, starting with an empty index");
            return CorpusLoad::without_items(CorpusStatus::Missing { path });
        }
        Err(CorpusError::Unreadable { path, reason }) => {
            warn!(%path, %reason, "corpus file unreadable, starting with an empty index");
            return CorpusLoad::without_items(CorpusStatus::Unreadable { path, reason });
        }
    };

    if text.trim().is_empty() {
        warn!(path = %path.display(), "corpus file is empty");
        return CorpusLoad::without_items(CorpusStatus::Empty);
    }

    let items = parse(&text);
    info!(path = %path.display(), items = items.len(), "corpus parsed");
    CorpusLoad {
        status: CorpusStatus::Loaded { items: items.len() },
        items,
    }
}
