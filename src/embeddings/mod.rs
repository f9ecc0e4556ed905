//! Embeddings module - Generate semantic embeddings for text
//!
//! Provides trait-based abstraction for embedding generation with ONNX backend.
//! The model is an opaque oracle: the retrieval core only needs `embed_query`.

mod onnx;
mod similarity;

pub use onnx::OnnxEmbedder;
pub use similarity::cosine_similarity;

use anyhow::Result;

use crate::config::EmbeddingsSection;

/// Trait for embedding generation engines
///
/// Requires Send so a shared vector store can hold one behind a mutex.
pub trait EmbeddingEngine: Send {
    /// Generate embedding for a single text
    fn embed(&mut self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding for a query text (with model-specific prefix if needed)
    ///
    /// For asymmetric models (e.g., BGE, E5), this applies query-specific formatting.
    /// For symmetric models (e.g., all-MiniLM), this is identical to embed().
    fn embed_query(&mut self, text: &str) -> Result<Vec<f32>> {
        self.embed(text)
    }

    /// Generate embeddings for multiple texts
    fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Get embedding dimension (e.g., 384 for all-MiniLM-L6-v2)
    fn dimension(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Create the ONNX embedder described by the `[embeddings]` config section
///
/// Prefers `model_quantized.onnx` over `model.onnx` when both exist.
pub fn create_embedder(section: &EmbeddingsSection) -> Result<Box<dyn EmbeddingEngine>> {
    let model_dir = &section.model_dir;
    let model_path_quantized = model_dir.join("model_quantized.onnx");
    let model_path = if model_path_quantized.exists() {
        model_path_quantized
    } else {
        model_dir.join("model.onnx")
    };
    let tokenizer_path = model_dir.join("tokenizer.json");

    Ok(Box::new(OnnxEmbedder::new_from_paths(
        &model_path,
        &tokenizer_path,
        &section.model_name,
        section.dimension,
        section.query_prefix.clone(),
    )?))
}
