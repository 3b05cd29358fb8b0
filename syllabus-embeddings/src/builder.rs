//! Builds the side-car vector artifact from a parsed corpus.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use syllabus_core::constants::EMPTY_EMBEDDING_TEXT;
use syllabus_core::errors::{EmbeddingError, SyllabusResult};
use syllabus_core::models::MicroItem;
use syllabus_core::traits::IEmbeddingProvider;
use tracing::info;

/// One artifact record: the item's content hash and its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub checksum: String,
    pub embedding: Vec<f32>,
}

/// On-disk side-car payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorArtifact {
    pub model: String,
    pub count: usize,
    pub dim: usize,
    pub vectors: Vec<ArtifactRecord>,
}

/// Embed every item's normalized text, in item order, `batch_size` at a time.
pub fn build_vector_artifact(
    items: &[MicroItem],
    provider: &dyn IEmbeddingProvider,
    model: &str,
    batch_size: usize,
) -> SyllabusResult<VectorArtifact> {
    if !provider.is_available() {
        return Err(EmbeddingError::ProviderUnavailable {
            provider: provider.name().to_string(),
        }
        .into());
    }

    let texts: Vec<String> = items
        .iter()
        .map(|item| {
            let text = item.normalized_text.trim();
            if text.is_empty() {
                EMPTY_EMBEDDING_TEXT.to_string()
            } else {
                text.to_string()
            }
        })
        .collect();

    let mut vectors = Vec::with_capacity(items.len());
    for (chunk_items, chunk_texts) in items
        .chunks(batch_size.max(1))
        .zip(texts.chunks(batch_size.max(1)))
    {
        let embeddings = provider.embed_batch(chunk_texts)?;
        if embeddings.len() != chunk_texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "provider returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk_texts.len()
                ),
            }
            .into());
        }
        vectors.extend(
            chunk_items
                .iter()
                .zip(embeddings)
                .map(|(item, embedding)| ArtifactRecord {
                    checksum: item.content_hash(),
                    embedding,
                }),
        );
        info!(embedded = vectors.len(), total = items.len(), "embedding batch done");
    }

    Ok(VectorArtifact {
        model: model.to_string(),
        count: vectors.len(),
        dim: vectors.first().map_or(0, |r| r.embedding.len()),
        vectors,
    })
}

/// Write the artifact as JSON, creating parent directories.
///
/// The payload goes to a sibling temp file first and is renamed into place.
pub fn write_artifact(artifact: &VectorArtifact, path: &Path) -> SyllabusResult<()> {
    let io_err = |e: std::io::Error| EmbeddingError::ArtifactIo {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = path.with_extension("json.tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp).map_err(io_err)?);
        serde_json::to_writer(&mut writer, artifact)?;
        writer.flush().map_err(io_err)?;
    }
    std::fs::rename(&tmp, path).map_err(io_err)?;

    info!(path = %path.display(), count = artifact.count, dim = artifact.dim, "vector artifact written");
    Ok(())
}
