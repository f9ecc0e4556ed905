//! Flat cosine index over pre-embedded chunks
//!
//! Ingestion writes `documents.json`, an array of `{content, metadata, embedding}`.
//! Every query is scored against every chunk; the corpus is a few thousand
//! chunks, so a linear parallel scan is fast enough.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use super::{Document, VectorStore};
use crate::embeddings::{cosine_similarity, EmbeddingEngine};

/// One stored chunk with its embedding
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedChunk {
    #[serde(flatten)]
    pub document: Document,
    pub embedding: Vec<f32>,
}

pub struct FlatVectorStore {
    chunks: Vec<EmbeddedChunk>,
    embedder: Mutex<Box<dyn EmbeddingEngine>>,
}

impl FlatVectorStore {
    pub fn new(chunks: Vec<EmbeddedChunk>, embedder: Box<dyn EmbeddingEngine>) -> Self {
        Self {
            chunks,
            embedder: Mutex::new(embedder),
        }
    }

    /// Load chunks written by ingestion
    pub fn load(path: &Path, embedder: Box<dyn EmbeddingEngine>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vector index: {}", path.display()))?;
        let chunks: Vec<EmbeddedChunk> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse vector index: {}", path.display()))?;
        Ok(Self::new(chunks, embedder))
    }
}

impl VectorStore for FlatVectorStore {
    fn similarity_search_with_score(&self, query: &str, k: usize) -> Result<Vec<(Document, f32)>> {
        let query_vec = self
            .embedder
            .lock()
            .embed_query(query)
            .context("Failed to embed query")?;
        let dim = query_vec.len();

        let skipped = self
            .chunks
            .iter()
            .filter(|c| c.embedding.len() != dim)
            .count();
        if skipped > 0 {
            warn!(skipped, expected = dim, "skipping chunks with mismatched embedding dimension");
        }

        let mut scored: Vec<(usize, f32)> = self
            .chunks
            .par_iter()
            .enumerate()
            .filter(|(_, c)| c.embedding.len() == dim)
            .map(|(i, c)| (i, cosine_similarity(&query_vec, &c.embedding)))
            // Corrupt embeddings score NaN
            .filter(|(_, score)| !score.is_nan())
            .collect();

        // Stable: equal scores keep index order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| (self.chunks[i].document.clone(), score))
            .collect())
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Maps a query onto a fixed 2-d direction
    struct AxisEmbedder;

    impl EmbeddingEngine for AxisEmbedder {
        fn embed(&mut self, text: &str) -> Result<Vec<f32>> {
            Ok(if text.contains("faq") {
                vec![0.0, 1.0]
            } else {
                vec![1.0, 0.0]
            })
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "axis"
        }
    }

    fn chunk(content: &str, embedding: Vec<f32>) -> EmbeddedChunk {
        EmbeddedChunk {
            document: Document::new(content),
            embedding,
        }
    }

    #[test]
    fn test_ranks_by_cosine() {
        let store = FlatVectorStore::new(
            vec![
                chunk("diagonal", vec![1.0, 1.0]),
                chunk("x", vec![1.0, 0.0]),
                chunk("y", vec![0.0, 1.0]),
            ],
            Box::new(AxisEmbedder),
        );

        let results = store.similarity_search_with_score("major", 3).unwrap();
        let order: Vec<_> = results.iter().map(|(d, _)| d.content.as_str()).collect();
        assert_eq!(order, vec!["x", "diagonal", "y"]);
        assert_relative_eq!(results[0].1, 1.0, epsilon = 1e-6);

        let results = store.similarity_search_with_score("faq", 1).unwrap();
        assert_eq!(results[0].0.content, "y");
    }

    #[test]
    fn test_skips_mismatched_dimensions() {
        let store = FlatVectorStore::new(
            vec![chunk("bad", vec![1.0, 0.0, 0.0]), chunk("good", vec![1.0, 0.0])],
            Box::new(AxisEmbedder),
        );
        let results = store.similarity_search_with_score("major", 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0.content, "good");
    }

    #[test]
    fn test_nan_embeddings_are_dropped() {
        let store = FlatVectorStore::new(
            vec![
                chunk("y", vec![0.0, 1.0]),
                chunk("broken", vec![f32::NAN, 1.0]),
                chunk("x", vec![1.0, 0.0]),
            ],
            Box::new(AxisEmbedder),
        );
        let results = store.similarity_search_with_score("major", 3).unwrap();
        let order: Vec<_> = results.iter().map(|(d, _)| d.content.as_str()).collect();
        assert_eq!(order, vec!["x", "y"]);
    }

    #[test]
    fn test_load_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");
        fs::write(
            &path,
            r#"[{"content": "Ngành AI", "metadata": {"type": "major", "major_id": "CS_AI"}, "embedding": [1.0, 0.0]}]"#,
        )
        .unwrap();

        let store = FlatVectorStore::load(&path, Box::new(AxisEmbedder)).unwrap();
        assert_eq!(store.len(), 1);
        let results = store.similarity_search_with_score("ai", 1).unwrap();
        assert_eq!(results[0].0.meta("major_id"), Some("CS_AI"));
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");
        fs::write(&path, "[{").unwrap();
        assert!(FlatVectorStore::load(&path, Box::new(AxisEmbedder)).is_err());
    }
}
