//! Per-query retrieval result

use serde::Serialize;

use super::intent::QueryType;
use crate::entity::Entity;
use crate::index::Document;
use crate::structured::{CombinationLookup, ScoreLookup, TuitionLookup};

/// Exact data attached to a result, one variant per lookup kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredPayload {
    Scores(ScoreLookup),
    Combinations(CombinationLookup),
    Tuition(TuitionLookup),
}

impl StructuredPayload {
    /// Number of records carried (scores, combinations or tuition groups)
    pub fn len(&self) -> usize {
        match self {
            Self::Scores(s) => s.scores.len(),
            Self::Combinations(c) => c.combinations.len(),
            Self::Tuition(t) => t.tuition_groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything retrieved for one query, plus the assembled context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResult {
    pub query_type: QueryType,
    pub semantic_results: Vec<Document>,
    pub structured_result: Option<StructuredPayload>,
    pub major_info: Option<Entity>,
    pub context: String,
}

impl RetrievalResult {
    pub fn new(query_type: QueryType, major_info: Option<Entity>) -> Self {
        Self {
            query_type,
            semantic_results: Vec::new(),
            structured_result: None,
            major_info,
            context: String::new(),
        }
    }

    /// Nothing semantic and nothing structured was found
    pub fn is_empty(&self) -> bool {
        self.semantic_results.is_empty() && self.structured_result.is_none()
    }
}
