//! Retrieval module - hybrid structured + semantic retrieval
//!
//! Public interface:
//! - `HybridRetriever` routes a query by its `QueryType`
//! - `RetrievalResult` carries documents, structured data and the context
//! - `extract_section` / `ContentCategory` for section-level extraction
//! - `format_sources` for citation display

mod citation;
mod context;
mod engine;
mod enhance;
mod intent;
mod result;
mod section;

pub use citation::{format_sources, truncate_text, NO_SOURCES};
pub use context::build_context;
pub use engine::{HybridRetriever, RetrieverSettings};
pub use enhance::{enhance_with_major_context, is_relevant};
pub use intent::{QueryClassifier, QueryType, Rule, Trigger, DEFAULT_RULES};
pub use result::{RetrievalResult, StructuredPayload};
pub use section::{extract_section, ContentCategory, ExtractError};
