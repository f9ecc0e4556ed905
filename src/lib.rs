//! Hybrid retrieval for university program questions
//!
//! Combines exact lookups over a structured snapshot (cutoff scores, tuition,
//! subject combinations) with metadata-filtered semantic search over embedded
//! program documents, and assembles a context for an answer generator.

pub mod config;
pub mod embeddings;
pub mod entity;
pub mod index;
pub mod rerank;
pub mod retrieval;
pub mod structured;

// Re-export commonly used types
pub use config::UniragConfig;
pub use entity::{Entity, EntityExtractor, EntityRegistry};
pub use index::{DocType, Document, MetadataFilter, SemanticIndex, VectorStore};
pub use retrieval::{HybridRetriever, QueryType, RetrievalResult};
pub use structured::StructuredDataStore;
