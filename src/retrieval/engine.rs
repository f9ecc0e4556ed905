//! HybridRetriever - routes each query to structured lookups and/or
//! filtered semantic search, then reranks and assembles the context

use std::sync::Arc;
use tracing::{debug, warn};

use super::context::build_context;
use super::enhance::enhance_with_major_context;
use super::intent::{QueryClassifier, QueryType};
use super::result::{RetrievalResult, StructuredPayload};
use super::section::{extract_section, ContentCategory};
use crate::config::UniragConfig;
use crate::entity::{Entity, EntityRegistry};
use crate::index::{DocType, Document, MetadataFilter, SemanticIndex};
use crate::rerank::{build_reranker, NoopReranker, Reranker};
use crate::structured::StructuredDataStore;

/// Result-count and reranking knobs for the retriever
#[derive(Debug, Clone)]
pub struct RetrieverSettings {
    /// Default number of semantic results (default: 5)
    pub k: usize,
    /// Documents kept after reranking (default: 5)
    pub rerank_top_k: usize,
}

impl Default for RetrieverSettings {
    fn default() -> Self {
        Self { k: 5, rerank_top_k: 5 }
    }
}

/// Top-level hybrid retrieval entry point
///
/// All components are read-only after construction, so one retriever can
/// serve concurrent queries.
pub struct HybridRetriever {
    registry: Arc<EntityRegistry>,
    classifier: QueryClassifier,
    structured: StructuredDataStore,
    index: SemanticIndex,
    reranker: Box<dyn Reranker>,
    settings: RetrieverSettings,
}

impl HybridRetriever {
    /// Create a retriever without reranking
    pub fn new(
        registry: Arc<EntityRegistry>,
        structured: StructuredDataStore,
        index: SemanticIndex,
    ) -> Self {
        Self {
            classifier: QueryClassifier::new(registry.clone()),
            registry,
            structured,
            index,
            reranker: Box::new(NoopReranker),
            settings: RetrieverSettings::default(),
        }
    }

    pub fn with_reranker(mut self, reranker: Box<dyn Reranker>) -> Self {
        self.reranker = reranker;
        self
    }

    /// Replace the classifier, e.g. with a custom rule table
    pub fn with_classifier(mut self, classifier: QueryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_settings(mut self, settings: RetrieverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Open every component described by the config; missing pieces degrade
    pub fn from_config(config: &UniragConfig) -> Self {
        let structured =
            StructuredDataStore::load(&config.paths.structured_path(), &config.retrieval);
        let index = SemanticIndex::from_config(config);

        Self::new(Arc::new(EntityRegistry::builtin()), structured, index)
            .with_reranker(build_reranker(&config.reranker))
            .with_settings(RetrieverSettings {
                k: config.retrieval.k,
                rerank_top_k: config.reranker.top_k,
            })
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn structured(&self) -> &StructuredDataStore {
        &self.structured
    }

    pub fn index(&self) -> &SemanticIndex {
        &self.index
    }

    pub fn reranker_name(&self) -> &'static str {
        self.reranker.name()
    }

    pub fn classify(&self, query: &str) -> QueryType {
        self.classifier.classify(query)
    }

    pub fn extract_entity(&self, query: &str) -> Option<&Entity> {
        self.registry.extract(query)
    }

    /// Hybrid search with the configured default `k`
    pub fn search(&self, query: &str) -> RetrievalResult {
        self.hybrid_search(query, self.settings.k)
    }

    pub fn hybrid_search(&self, query: &str, k: usize) -> RetrievalResult {
        let query_type = self.classify(query);
        let entity = self.extract_entity(query);
        debug!(%query_type, entity = ?entity.map(|e| e.id.as_str()), k, "routing query");

        let mut result = RetrievalResult::new(query_type, entity.cloned());

        match query_type {
            QueryType::CutoffScores => {
                let filter = MetadataFilter::by_type(DocType::CutoffAnalysis);
                let (scores, docs) = rayon::join(
                    || self.structured.lookup_scores(query, &self.registry),
                    || self.index.search(query, k, Some(&filter)),
                );
                result.structured_result = scores.map(StructuredPayload::Scores);
                let mut docs = enhance_with_major_context(entity, docs);
                docs.truncate(k);
                result.semantic_results = docs;
            }
            QueryType::Tuition => {
                result.structured_result = self
                    .structured
                    .lookup_tuition(entity)
                    .map(StructuredPayload::Tuition);
                if entity.is_some() {
                    let filter = MetadataFilter::by_type(DocType::Major);
                    let docs = self.index.search(query, k, Some(&filter));
                    result.semantic_results = enhance_with_major_context(entity, docs);
                }
            }
            QueryType::SubjectCombinations => {
                if entity.is_some() {
                    result.semantic_results =
                        self.search_major_content(query, entity, k, ContentCategory::Admission);
                } else {
                    let filter = MetadataFilter::by_type(DocType::AdmissionMethod);
                    let (combinations, docs) = rayon::join(
                        || self.structured.lookup_combinations(query),
                        || self.index.search(query, k, Some(&filter)),
                    );
                    result.structured_result = combinations.map(StructuredPayload::Combinations);
                    result.semantic_results = docs;
                }
            }
            QueryType::Career => {
                result.semantic_results =
                    self.search_major_content(query, entity, k, ContentCategory::Career);
            }
            QueryType::Curriculum => {
                result.semantic_results =
                    self.search_major_content(query, entity, k, ContentCategory::Curriculum);
            }
            QueryType::AdmissionMethods => {
                result.semantic_results = if entity.is_some() {
                    self.search_major_content(query, entity, k, ContentCategory::Admission)
                } else {
                    let filter = MetadataFilter::by_type(DocType::AdmissionMethod);
                    self.index.search(query, k, Some(&filter))
                };
            }
            QueryType::MajorInfo => {
                result.semantic_results = self.search_major_docs(query, entity, k);
            }
            QueryType::Faq => {
                let filter = MetadataFilter::by_type(DocType::Faq);
                let mut docs = self.index.search(query, k, Some(&filter));
                if docs.is_empty() {
                    if let Some(entity) = entity {
                        docs = self.search_by_major_id(entity, k.saturating_mul(5));
                    }
                }
                let mut docs = enhance_with_major_context(entity, docs);
                docs.truncate(k);
                result.semantic_results = docs;
            }
        }

        if !result.semantic_results.is_empty() {
            let docs = std::mem::take(&mut result.semantic_results);
            result.semantic_results = self.reranker.rerank(query, docs, self.settings.rerank_top_k);
        }

        result.context = build_context(&result);
        result
    }

    /// Program documents, entity-boosted and narrowed to the entity when possible
    pub fn search_major_docs(&self, query: &str, entity: Option<&Entity>, k: usize) -> Vec<Document> {
        let filter = MetadataFilter::by_type(DocType::Major);
        let mut docs = self.index.search(query, k.saturating_mul(2), Some(&filter));

        if docs.is_empty() {
            if let Some(entity) = entity {
                debug!(major_id = %entity.id, "no program documents for query, searching by id");
                docs = self.search_by_major_id(entity, k.saturating_mul(5));
            }
        }

        let mut docs = enhance_with_major_context(entity, docs);

        if let Some(entity) = entity {
            if docs.iter().any(|d| d.meta("major_id") == Some(entity.id.as_str())) {
                docs.retain(|d| d.meta("major_id") == Some(entity.id.as_str()));
            }
        }

        docs.truncate(k);
        docs
    }

    /// Program documents with the `category` section cut out of each
    ///
    /// Documents that don't mention the category, or whose extraction fails,
    /// are kept whole.
    pub fn search_major_content(
        &self,
        query: &str,
        entity: Option<&Entity>,
        k: usize,
        category: ContentCategory,
    ) -> Vec<Document> {
        self.search_major_docs(query, entity, k.saturating_mul(3))
            .into_iter()
            .map(|doc| {
                if !category.detect(&doc.content) {
                    return doc;
                }
                match extract_section(&doc.content, category) {
                    Ok(section) => Document {
                        content: section,
                        metadata: doc.metadata.clone(),
                    }
                    .with_meta("content_type", format!("{}_only", category)),
                    Err(e) => {
                        warn!(error = %e, %category, "section extraction failed, keeping full document");
                        doc
                    }
                }
            })
            .take(k)
            .collect()
    }

    fn search_by_major_id(&self, entity: &Entity, k: usize) -> Vec<Document> {
        let filter = MetadataFilter::by_type(DocType::Major).with_major(entity.id.as_str());
        self.index.search(&entity.id, k, Some(&filter))
    }
}
