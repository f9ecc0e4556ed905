//! Semantic index - metadata-filtered nearest-neighbour search over chunks
//!
//! `SemanticIndex` wraps an optional `VectorStore`. When the store is absent
//! or a search fails, every query degrades to an empty result list.

mod flat;

pub use flat::{EmbeddedChunk, FlatVectorStore};

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::{RetrievalSection, UniragConfig};
use crate::embeddings::create_embedder;

/// Metadata key holding the document type tag
pub const FILTER_TYPE: &str = "type";
/// Metadata key holding the program id
pub const FILTER_MAJOR_ID: &str = "major_id";

/// Default over-fetch factor for filtered searches
pub const DEFAULT_FETCH_MULTIPLIER: usize = 4;
/// Default minimum similarity for `search_scored`
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.5;

/// Kind of indexed chunk, as tagged by ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Major,
    Faq,
    AdmissionMethod,
    CutoffAnalysis,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Major => "major",
            DocType::Faq => "faq",
            DocType::AdmissionMethod => "admission_method",
            DocType::CutoffAnalysis => "cutoff_analysis",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "major" => Some(DocType::Major),
            "faq" => Some(DocType::Faq),
            "admission_method" => Some(DocType::AdmissionMethod),
            "cutoff_analysis" => Some(DocType::CutoffAnalysis),
            _ => None,
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text chunk plus its flat string metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default, deserialize_with = "metadata_from_json")]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Builder-style metadata insert
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn doc_type(&self) -> Option<DocType> {
        self.meta(FILTER_TYPE).and_then(DocType::parse)
    }
}

/// Ingestion writes numbers, booleans and nulls into metadata; flatten them
/// to strings and drop nulls.
fn metadata_from_json<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

/// Exact-equality AND filter over metadata keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFilter {
    clauses: BTreeMap<String, String>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_type(doc_type: DocType) -> Self {
        Self::new().with(FILTER_TYPE, doc_type.as_str())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.insert(key.into(), value.into());
        self
    }

    pub fn with_major(self, major_id: impl Into<String>) -> Self {
        self.with(FILTER_MAJOR_ID, major_id)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(key, value)| doc.meta(key) == Some(value.as_str()))
    }
}

/// Nearest-neighbour backend (external index boundary)
///
/// Scores are similarities: higher means closer to the query.
pub trait VectorStore: Send + Sync {
    /// Top-k chunks for the query, best first
    fn similarity_search_with_score(&self, query: &str, k: usize)
        -> Result<Vec<(Document, f32)>>;

    /// Number of indexed chunks
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only semantic search handle shared by all queries
pub struct SemanticIndex {
    store: Option<Box<dyn VectorStore>>,
    fetch_multiplier: usize,
    similarity_threshold: f32,
}

impl SemanticIndex {
    pub fn new(store: Box<dyn VectorStore>) -> Self {
        Self {
            store: Some(store),
            fetch_multiplier: DEFAULT_FETCH_MULTIPLIER,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// Index that answers every query with nothing
    pub fn unavailable() -> Self {
        Self {
            store: None,
            fetch_multiplier: DEFAULT_FETCH_MULTIPLIER,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_fetch_multiplier(mut self, multiplier: usize) -> Self {
        self.fetch_multiplier = multiplier.max(1);
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Apply `[retrieval]` fetch multiplier and similarity threshold
    pub fn with_retrieval_settings(self, settings: &RetrievalSection) -> Self {
        self.with_fetch_multiplier(settings.fetch_multiplier)
            .with_similarity_threshold(settings.similarity_threshold)
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    /// Open the on-disk flat index; any failure yields an unavailable index
    pub fn from_config(config: &UniragConfig) -> Self {
        let documents_path = config.paths.documents_path();
        if !documents_path.exists() {
            warn!(path = %documents_path.display(), "vector index not found, semantic search disabled");
            return Self::unavailable();
        }

        let embedder = match create_embedder(&config.embeddings) {
            Ok(embedder) => embedder,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "embedding model unavailable, semantic search disabled");
                return Self::unavailable();
            }
        };

        match FlatVectorStore::load(&documents_path, embedder) {
            Ok(store) => {
                info!(chunks = store.len(), "vector index loaded");
                Self::new(Box::new(store)).with_retrieval_settings(&config.retrieval)
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "failed to load vector index, semantic search disabled");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-k documents, optionally post-filtered on metadata
    pub fn search(&self, query: &str, k: usize, filter: Option<&MetadataFilter>) -> Vec<Document> {
        self.scored(query, k, None, filter)
            .into_iter()
            .map(|(doc, _)| doc)
            .collect()
    }

    /// Like `search`, but keeps scores and drops candidates below `threshold`
    pub fn search_with_score(
        &self,
        query: &str,
        k: usize,
        threshold: f32,
        filter: Option<&MetadataFilter>,
    ) -> Vec<(Document, f32)> {
        self.scored(query, k, Some(threshold), filter)
    }

    /// `search_with_score` using the configured similarity threshold
    pub fn search_scored(
        &self,
        query: &str,
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Vec<(Document, f32)> {
        self.scored(query, k, Some(self.similarity_threshold), filter)
    }

    fn scored(
        &self,
        query: &str,
        k: usize,
        threshold: Option<f32>,
        filter: Option<&MetadataFilter>,
    ) -> Vec<(Document, f32)> {
        let Some(store) = &self.store else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let filter = filter.filter(|f| !f.is_empty());
        let fetch = match filter {
            Some(_) => k.saturating_mul(self.fetch_multiplier),
            None => k,
        };

        let mut candidates = match store.similarity_search_with_score(query, fetch) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "semantic search failed");
                return Vec::new();
            }
        };

        if let Some(threshold) = threshold {
            candidates.retain(|(_, score)| *score >= threshold);
        }

        if let Some(filter) = filter {
            let fetched = candidates.len();
            candidates.retain(|(doc, _)| filter.matches(doc));
            if candidates.is_empty() && fetched > 0 {
                debug!(fetched, ?filter, "metadata filter removed every candidate");
            }
        }

        candidates.truncate(k);
        candidates
    }
}

impl fmt::Debug for SemanticIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticIndex")
            .field("available", &self.is_available())
            .field("chunks", &self.len())
            .field("fetch_multiplier", &self.fetch_multiplier)
            .field("similarity_threshold", &self.similarity_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use parking_lot::Mutex;

    /// Returns its documents in order with descending scores, recording fetch sizes
    struct ListStore {
        docs: Vec<Document>,
        fetches: Mutex<Vec<usize>>,
    }

    impl ListStore {
        fn new(docs: Vec<Document>) -> Self {
            Self {
                docs,
                fetches: Mutex::new(Vec::new()),
            }
        }
    }

    impl VectorStore for ListStore {
        fn similarity_search_with_score(
            &self,
            _query: &str,
            k: usize,
        ) -> Result<Vec<(Document, f32)>> {
            self.fetches.lock().push(k);
            Ok(self
                .docs
                .iter()
                .take(k)
                .enumerate()
                .map(|(i, d)| (d.clone(), 1.0 - i as f32 * 0.1))
                .collect())
        }

        fn len(&self) -> usize {
            self.docs.len()
        }
    }

    struct BrokenStore;

    impl VectorStore for BrokenStore {
        fn similarity_search_with_score(&self, _: &str, _: usize) -> Result<Vec<(Document, f32)>> {
            bail!("index file truncated")
        }

        fn len(&self) -> usize {
            0
        }
    }

    fn doc(content: &str, doc_type: DocType, major: &str) -> Document {
        Document::new(content)
            .with_meta(FILTER_TYPE, doc_type.as_str())
            .with_meta(FILTER_MAJOR_ID, major)
    }

    fn mixed_docs() -> Vec<Document> {
        vec![
            doc("faq 1", DocType::Faq, "CS_AI"),
            doc("major ai", DocType::Major, "CS_AI"),
            doc("cutoff", DocType::CutoffAnalysis, "CS_SE"),
            doc("major se", DocType::Major, "CS_SE"),
            doc("major ai 2", DocType::Major, "CS_AI"),
            doc("faq 2", DocType::Faq, "CS_SE"),
        ]
    }

    #[test]
    fn test_unavailable_index_returns_empty() {
        let index = SemanticIndex::unavailable();
        assert!(index.search("ngành AI", 5, None).is_empty());
        assert!(index
            .search_with_score("ngành AI", 5, 0.0, Some(&MetadataFilter::by_type(DocType::Faq)))
            .is_empty());
    }

    #[test]
    fn test_unfiltered_search_fetches_k() {
        let store = ListStore::new(mixed_docs());
        let index = SemanticIndex::new(Box::new(store));
        let docs = index.search("q", 3, None);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].content, "faq 1");
    }

    #[test]
    fn test_filtered_search_overfetches_and_matches_all_keys() {
        let index = SemanticIndex::new(Box::new(ListStore::new(mixed_docs())));
        let filter = MetadataFilter::by_type(DocType::Major).with_major("CS_AI");
        let docs = index.search("q", 1, Some(&filter));
        // Only 4 candidates are fetched (1 x 4); "major ai 2" sits at position 5
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "major ai");

        let docs = index.search("q", 2, Some(&filter));
        assert!(docs.len() <= 2);
        assert!(docs.iter().all(|d| filter.matches(d)));
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_filtered_fetch_size_uses_multiplier() {
        let store = std::sync::Arc::new(ListStore::new(mixed_docs()));

        struct Shared(std::sync::Arc<ListStore>);
        impl VectorStore for Shared {
            fn similarity_search_with_score(&self, q: &str, k: usize) -> Result<Vec<(Document, f32)>> {
                self.0.similarity_search_with_score(q, k)
            }
            fn len(&self) -> usize {
                self.0.len()
            }
        }

        let index = SemanticIndex::new(Box::new(Shared(store.clone())));
        index.search("q", 2, Some(&MetadataFilter::by_type(DocType::Faq)));
        index.search("q", 2, None);
        assert_eq!(*store.fetches.lock(), vec![8, 2]);
    }

    #[test]
    fn test_over_narrow_filter_returns_empty() {
        let index = SemanticIndex::new(Box::new(ListStore::new(mixed_docs())));
        let filter = MetadataFilter::by_type(DocType::AdmissionMethod);
        assert!(index.search("q", 5, Some(&filter)).is_empty());
    }

    #[test]
    fn test_threshold_drops_low_scores() {
        let index = SemanticIndex::new(Box::new(ListStore::new(mixed_docs())));
        let scored = index.search_with_score("q", 6, 0.75, None);
        // Scores are 1.0, 0.9, 0.8, 0.7, ...
        assert_eq!(scored.len(), 3);
        assert!(scored.iter().all(|(_, s)| *s >= 0.75));
    }

    #[test]
    fn test_scored_search_uses_configured_threshold() {
        let index = SemanticIndex::new(Box::new(ListStore::new(mixed_docs())));
        assert_eq!(index.similarity_threshold(), DEFAULT_SIMILARITY_THRESHOLD);

        let index = index.with_similarity_threshold(0.65);
        let scored = index.search_scored("q", 6, None);
        // 1.0, 0.9, 0.8, 0.7 clear the bar; 0.6 does not
        assert_eq!(scored.len(), 4);
        assert!(scored.iter().all(|(_, s)| *s >= 0.65));

        let filter = MetadataFilter::by_type(DocType::Faq);
        let scored = index.search_scored("q", 6, Some(&filter));
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].0.content, "faq 1");
    }

    #[test]
    fn test_retrieval_settings_apply() {
        let settings = RetrievalSection {
            similarity_threshold: 0.85,
            fetch_multiplier: 0,
            ..RetrievalSection::default()
        };
        let index =
            SemanticIndex::new(Box::new(ListStore::new(mixed_docs()))).with_retrieval_settings(&settings);
        assert_eq!(index.similarity_threshold(), 0.85);
        assert_eq!(index.search_scored("q", 6, None).len(), 2);
        // Multiplier is clamped to 1: a single candidate is fetched and it is not a major
        assert!(index
            .search("q", 1, Some(&MetadataFilter::by_type(DocType::Major)))
            .is_empty());
    }

    #[test]
    fn test_huge_k_does_not_overflow() {
        let index = SemanticIndex::new(Box::new(ListStore::new(mixed_docs())));
        let filter = MetadataFilter::by_type(DocType::Major);
        let docs = index.search("q", usize::MAX, Some(&filter));
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn test_store_failure_degrades_to_empty() {
        let index = SemanticIndex::new(Box::new(BrokenStore));
        assert!(index.search("q", 5, None).is_empty());
    }

    #[test]
    fn test_zero_k_returns_empty() {
        let index = SemanticIndex::new(Box::new(ListStore::new(mixed_docs())));
        assert!(index.search("q", 0, None).is_empty());
    }

    #[test]
    fn test_metadata_deserializes_scalars() {
        let json = r#"{"content": "x", "metadata": {"type": "major", "year": 2024, "hot": true, "note": null}}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.meta("type"), Some("major"));
        assert_eq!(doc.meta("year"), Some("2024"));
        assert_eq!(doc.meta("hot"), Some("true"));
        assert_eq!(doc.meta("note"), None);
        assert_eq!(doc.doc_type(), Some(DocType::Major));
    }
}
