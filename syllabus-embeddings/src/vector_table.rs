//! Side-car vector table: loading, record extraction and alignment with the
//! parsed MicroItem list.
//!
//! Artifacts are JSON. The record list is either the top-level array or the
//! first array found under one of [`WRAPPER_KEYS`]. A record is a bare number
//! array or an object holding the vector under one of [`VECTOR_KEYS`], with an
//! optional `checksum`/`hash` string.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use syllabus_core::errors::{EmbeddingError, SyllabusResult};
use syllabus_core::models::MicroItem;
use tracing::{info, warn};

use crate::similarity::{cosine_with_norms, l2_norm};

/// Top-level keys that may wrap the record list.
pub const WRAPPER_KEYS: &[&str] = &["vectors", "embeddings", "items", "data", "records"];

/// Record keys that may hold the vector.
pub const VECTOR_KEYS: &[&str] = &["embedding", "vector", "values"];

const CHECKSUM_KEYS: &[&str] = &["checksum", "hash"];

/// One record of the artifact. An empty embedding marks an unusable record.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub embedding: Vec<f32>,
    pub checksum: Option<String>,
}

/// How vectors were paired with items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    /// No table loaded.
    None,
    /// Record `i` belongs to item `i`.
    Positional,
    /// Records paired by content checksum.
    Checksum,
}

/// Summary of one alignment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub mode: AlignmentMode,
    pub records: usize,
    pub items: usize,
    pub paired: usize,
    pub dimensions: usize,
}

struct VectorEntry {
    vector: Vec<f32>,
    norm: f32,
}

/// Per-item vectors, indexed like the MicroItem list they were aligned to.
pub struct VectorTable {
    entries: Vec<Option<VectorEntry>>,
    alignment: Alignment,
}

impl VectorTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            alignment: Alignment {
                mode: AlignmentMode::None,
                records: 0,
                items: 0,
                paired: 0,
                dimensions: 0,
            },
        }
    }

    /// Read an artifact from disk and align it with `items`.
    pub fn load(path: &Path, items: &[MicroItem], require_checksums: bool) -> SyllabusResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EmbeddingError::ArtifactIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| EmbeddingError::ArtifactMalformed {
                reason: e.to_string(),
            })?;
        let records = parse_artifact(&value)?;
        let table = Self::align(records, items, require_checksums)?;
        info!(
            path = %path.display(),
            mode = ?table.alignment.mode,
            records = table.alignment.records,
            items = table.alignment.items,
            paired = table.alignment.paired,
            dims = table.alignment.dimensions,
            "vector table loaded"
        );
        Ok(table)
    }

    /// Pair records with items.
    ///
    /// When every record carries a checksum, items are paired with the record
    /// whose checksum equals their content hash. Otherwise record `i` goes to
    /// item `i`; surplus records are dropped and surplus items get no vector.
    pub fn align(
        records: Vec<VectorRecord>,
        items: &[MicroItem],
        require_checksums: bool,
    ) -> SyllabusResult<Self> {
        let record_count = records.len();
        let dimensions = records
            .iter()
            .map(|r| r.embedding.len())
            .find(|&len| len > 0)
            .unwrap_or(0);

        let checksummed = !records.is_empty() && records.iter().all(|r| r.checksum.is_some());
        if require_checksums && !checksummed {
            return Err(EmbeddingError::TableUnavailable {
                reason: "artifact records carry no checksums".to_string(),
            }
            .into());
        }

        let mut dropped = 0usize;
        let mut entry = |embedding: Vec<f32>| -> Option<VectorEntry> {
            if embedding.is_empty() || embedding.len() != dimensions {
                dropped += 1;
                return None;
            }
            let norm = l2_norm(&embedding);
            Some(VectorEntry {
                vector: embedding,
                norm,
            })
        };

        let (mode, entries) = if checksummed {
            let mut by_checksum: HashMap<String, Vec<f32>> = HashMap::with_capacity(record_count);
            for record in records {
                if let Some(checksum) = record.checksum {
                    by_checksum.entry(checksum).or_insert(record.embedding);
                }
            }
            let entries: Vec<Option<VectorEntry>> = items
                .iter()
                .map(|item| {
                    by_checksum
                        .get(&item.content_hash())
                        .and_then(|v| entry(v.clone()))
                })
                .collect();
            (AlignmentMode::Checksum, entries)
        } else {
            if record_count != items.len() {
                warn!(
                    records = record_count,
                    items = items.len(),
                    "vector count differs from item count, aligning by position"
                );
            }
            let mut entries: Vec<Option<VectorEntry>> = records
                .into_iter()
                .take(items.len())
                .map(|r| entry(r.embedding))
                .collect();
            entries.resize_with(items.len(), || None);
            (AlignmentMode::Positional, entries)
        };

        if dropped > 0 {
            warn!(dropped, dimensions, "skipped vectors with unexpected dimensions");
        }

        let paired = entries.iter().filter(|e| e.is_some()).count();
        if mode == AlignmentMode::Checksum && paired < items.len() {
            warn!(
                paired,
                items = items.len(),
                "some items have no vector with a matching checksum"
            );
        }

        Ok(Self {
            entries,
            alignment: Alignment {
                mode,
                records: record_count,
                items: items.len(),
                paired,
                dimensions,
            },
        })
    }

    /// Whether no item has a usable vector.
    pub fn is_empty(&self) -> bool {
        self.alignment.paired == 0
    }

    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    pub fn dimensions(&self) -> usize {
        self.alignment.dimensions
    }

    /// Vector paired with item `index`, if any.
    pub fn vector(&self, index: usize) -> Option<&[f32]> {
        self.entries
            .get(index)
            .and_then(|e| e.as_ref())
            .map(|e| e.vector.as_slice())
    }

    /// Item indices ranked by cosine similarity to `query`, at most `limit`.
    ///
    /// Zero-norm vectors are excluded. Ties keep item order.
    pub fn nearest(&self, query: &[f32], limit: usize) -> SyllabusResult<Vec<(usize, f32)>> {
        if query.len() != self.alignment.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.alignment.dimensions,
                actual: query.len(),
            }
            .into());
        }
        let query_norm = l2_norm(query);

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let entry = entry.as_ref()?;
                cosine_with_norms(query, query_norm, &entry.vector, entry.norm).map(|s| (idx, s))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(limit);
        Ok(scored)
    }
}

/// Extract records from an artifact payload.
pub fn parse_artifact(value: &Value) -> SyllabusResult<Vec<VectorRecord>> {
    let list = match value {
        Value::Array(list) => list,
        Value::Object(map) => WRAPPER_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .ok_or_else(|| EmbeddingError::ArtifactMalformed {
                reason: format!("no record list under any of {WRAPPER_KEYS:?}"),
            })?,
        _ => {
            return Err(EmbeddingError::ArtifactMalformed {
                reason: "artifact is neither a list nor an object".to_string(),
            }
            .into())
        }
    };
    Ok(list.iter().map(parse_record).collect())
}

fn parse_record(value: &Value) -> VectorRecord {
    match value {
        Value::Array(numbers) => VectorRecord {
            embedding: parse_numbers(numbers),
            checksum: None,
        },
        Value::Object(map) => VectorRecord {
            embedding: VECTOR_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array))
                .map(|numbers| parse_numbers(numbers))
                .unwrap_or_default(),
            checksum: CHECKSUM_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string),
        },
        _ => VectorRecord {
            embedding: Vec::new(),
            checksum: None,
        },
    }
}

/// All-or-nothing: a single non-numeric entry makes the record unusable.
fn parse_numbers(numbers: &[Value]) -> Vec<f32> {
    numbers
        .iter()
        .map(|n| n.as_f64().map(|f| f as f32))
        .collect::<Option<Vec<f32>>>()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    fn item(text: &str) -> MicroItem {
        MicroItem {
            course_title: String::new(),
            course_url: String::new(),
            step_title: String::new(),
            step_url: String::new(),
            module_title: String::new(),
            module_url: String::new(),
            lesson_title: text.to_string(),
            lesson_url: String::new(),
            section_title: String::new(),
            material_title: text.to_string(),
            homework: String::new(),
            lesson_blob: Arc::from(""),
            normalized_text: text.to_string(),
        }
    }

    fn raw(v: &[f32]) -> VectorRecord {
        VectorRecord {
            embedding: v.to_vec(),
            checksum: None,
        }
    }

    #[test]
    fn accepts_top_level_list_and_wrappers() {
        let list = json!([[1.0, 0.0], {"vector": [0.0, 1.0]}]);
        assert_eq!(parse_artifact(&list).unwrap().len(), 2);

        for key in WRAPPER_KEYS {
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), json!([{"values": [1.0, 2.0], "hash": "h"}]));
            let wrapped = Value::Object(map);
            let records = parse_artifact(&wrapped).unwrap();
            assert_eq!(records[0].embedding, vec![1.0, 2.0]);
            assert_eq!(records[0].checksum.as_deref(), Some("h"));
        }
    }

    #[test]
    fn rejects_payload_without_list() {
        assert!(parse_artifact(&json!({"model": "x"})).is_err());
        assert!(parse_artifact(&json!(42)).is_err());
    }

    #[test]
    fn non_numeric_record_is_unusable_but_keeps_position() {
        let records = parse_artifact(&json!([[1.0, "x"], [0.0, 1.0]])).unwrap();
        assert!(records[0].embedding.is_empty());
        let items = vec![item("a"), item("b")];
        let table = VectorTable::align(records, &items, false).unwrap();
        assert!(table.vector(0).is_none());
        assert_eq!(table.vector(1), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn positional_truncates_surplus_records() {
        let items = vec![item("a"), item("b")];
        let records = vec![raw(&[1.0, 0.0]), raw(&[0.0, 1.0]), raw(&[1.0, 1.0])];
        let table = VectorTable::align(records, &items, false).unwrap();
        assert_eq!(table.alignment().mode, AlignmentMode::Positional);
        assert_eq!(table.alignment().paired, 2);
        assert_eq!(table.alignment().records, 3);
    }

    #[test]
    fn positional_short_table_scores_prefix_only() {
        let items = vec![item("a"), item("b"), item("c")];
        let table = VectorTable::align(vec![raw(&[1.0, 0.0])], &items, false).unwrap();
        assert_eq!(table.alignment().paired, 1);
        assert!(table.vector(2).is_none());
        let hits = table.nearest(&[1.0, 0.0], 10).unwrap();
        assert_eq!(hits, vec![(0, 1.0)]);
    }

    #[test]
    fn checksum_pairing_survives_reordering() {
        let items = vec![item("a"), item("b")];
        let records = vec![
            VectorRecord {
                embedding: vec![0.0, 1.0],
                checksum: Some(items[1].content_hash()),
            },
            VectorRecord {
                embedding: vec![1.0, 0.0],
                checksum: Some(items[0].content_hash()),
            },
        ];
        let table = VectorTable::align(records, &items, true).unwrap();
        assert_eq!(table.alignment().mode, AlignmentMode::Checksum);
        assert_eq!(table.vector(0), Some(&[1.0, 0.0][..]));
        assert_eq!(table.vector(1), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn checksum_mismatch_leaves_item_unpaired() {
        let items = vec![item("a"), item("b")];
        let records = vec![
            VectorRecord {
                embedding: vec![1.0, 0.0],
                checksum: Some(items[0].content_hash()),
            },
            VectorRecord {
                embedding: vec![0.0, 1.0],
                checksum: Some("stale".into()),
            },
        ];
        let table = VectorTable::align(records, &items, false).unwrap();
        assert_eq!(table.alignment().paired, 1);
        assert!(table.vector(1).is_none());
    }

    #[test]
    fn require_checksums_rejects_bare_vectors() {
        let items = vec![item("a")];
        assert!(VectorTable::align(vec![raw(&[1.0])], &items, true).is_err());
    }

    #[test]
    fn nearest_ranks_and_skips_zero_vectors() {
        let items = vec![item("a"), item("b"), item("c")];
        let records = vec![raw(&[0.0, 0.0]), raw(&[0.6, 0.8]), raw(&[1.0, 0.0])];
        let table = VectorTable::align(records, &items, false).unwrap();
        let hits = table.nearest(&[1.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, 2);
        assert_eq!(hits[1].0, 1);
    }

    #[test]
    fn nearest_rejects_wrong_query_dimensions() {
        let items = vec![item("a")];
        let table = VectorTable::align(vec![raw(&[1.0, 0.0])], &items, false).unwrap();
        assert!(table.nearest(&[1.0, 0.0, 0.0], 5).is_err());
    }

    #[test]
    fn mismatched_dimensions_are_dropped() {
        let items = vec![item("a"), item("b")];
        let records = vec![raw(&[1.0, 0.0]), raw(&[1.0, 0.0, 0.0])];
        let table = VectorTable::align(records, &items, false).unwrap();
        assert_eq!(table.dimensions(), 2);
        assert_eq!(table.alignment().paired, 1);
    }

    #[test]
    fn empty_table() {
        let table = VectorTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.alignment().mode, AlignmentMode::None);
    }
}
