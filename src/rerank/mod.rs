//! Reranking - optional cross-encoder reordering of candidate documents
//!
//! `Reranker` is a strategy chosen once at construction time:
//! `CrossEncoderReranker` wraps a `PairScorer`, `NoopReranker` passes input
//! through unchanged. Callers never check whether a model is configured.

mod cross_encoder;

pub use cross_encoder::OnnxCrossEncoder;

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use crate::config::RerankerSection;
use crate::index::Document;
use crate::retrieval::truncate_text;

/// Relevance oracle over (query, passage) pairs; higher is more relevant
pub trait PairScorer: Send + Sync {
    fn score(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>>;
}

/// Reorders candidate documents by relevance to the query
pub trait Reranker: Send + Sync {
    /// Strategy name for diagnostics
    fn name(&self) -> &'static str;

    /// Output is at most `top_k` long and only contains input documents
    fn rerank(&self, query: &str, docs: Vec<Document>, top_k: usize) -> Vec<Document>;
}

/// Identity strategy used when no cross-encoder is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReranker;

impl Reranker for NoopReranker {
    fn name(&self) -> &'static str {
        "none"
    }

    fn rerank(&self, _query: &str, docs: Vec<Document>, _top_k: usize) -> Vec<Document> {
        docs
    }
}

/// Cross-encoder strategy
pub struct CrossEncoderReranker {
    scorer: Box<dyn PairScorer>,
}

impl CrossEncoderReranker {
    pub fn new(scorer: Box<dyn PairScorer>) -> Self {
        Self { scorer }
    }

    fn scores(&self, query: &str, docs: &[Document]) -> Result<Vec<f32>> {
        let passages: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
        let scores = self.scorer.score(query, &passages)?;
        if scores.len() != docs.len() {
            bail!(
                "scorer returned {} scores for {} documents",
                scores.len(),
                docs.len()
            );
        }
        Ok(scores)
    }
}

impl Reranker for CrossEncoderReranker {
    fn name(&self) -> &'static str {
        "cross-encoder"
    }

    fn rerank(&self, query: &str, mut docs: Vec<Document>, top_k: usize) -> Vec<Document> {
        if docs.len() < 2 {
            return docs;
        }

        let scores = match self.scores(query, &docs) {
            Ok(scores) => scores,
            Err(e) => {
                warn!(error = %format!("{:#}", e), top_k, "reranking failed, keeping original order");
                docs.truncate(top_k);
                return docs;
            }
        };

        let total = docs.len();
        // NaN ranks last
        let mut scored: Vec<(Document, f32)> = docs
            .into_iter()
            .zip(scores)
            .map(|(doc, s)| (doc, if s.is_nan() { f32::NEG_INFINITY } else { s }))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (rank, (doc, score)) in scored.iter().take(5).enumerate() {
            debug!(
                rank = rank + 1,
                score,
                doc_type = doc.meta("type").unwrap_or("N/A"),
                major = doc.meta("major_name").unwrap_or("N/A"),
                preview = %truncate_text(&doc.content, 80),
                "rerank score"
            );
        }

        scored.truncate(top_k);
        info!("reranked: {} → {} docs", total, scored.len());
        scored.into_iter().map(|(doc, _)| doc).collect()
    }
}

/// Select the reranking strategy from config
///
/// A disabled section or a model that fails to load yields `NoopReranker`.
pub fn build_reranker(section: &RerankerSection) -> Box<dyn Reranker> {
    if !section.enabled {
        debug!("reranker disabled");
        return Box::new(NoopReranker);
    }

    match OnnxCrossEncoder::from_dir(&section.model_dir, section.max_length) {
        Ok(scorer) => {
            info!(model = %section.model_dir.display(), "reranker loaded");
            Box::new(CrossEncoderReranker::new(Box::new(scorer)))
        }
        Err(e) => {
            warn!(error = %format!("{:#}", e), "failed to load reranker, continuing without reranking");
            Box::new(NoopReranker)
        }
    }
}
