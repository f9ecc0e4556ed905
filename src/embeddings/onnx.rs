//! ONNX Runtime sentence embedder (mean pooling + L2 normalisation)

use super::EmbeddingEngine;
use anyhow::{anyhow, bail, Context, Result};
use ndarray::Array2;
use ort::{inputs, session::Session, value::Value};
use std::path::Path;
use tokenizers::Tokenizer;

/// Token limit shared by the MiniLM / E5 / BGE family
const MAX_TOKENS: usize = 512;

/// ONNX-based embedding generator
pub struct OnnxEmbedder {
    session: Session,
    tokenizer: Tokenizer,
    dimension: usize,
    model_name: String,
    query_prefix: Option<String>,
}

impl OnnxEmbedder {
    /// Create an embedder from explicit model and tokenizer files
    ///
    /// # Arguments
    /// * `model_path` - Path to ONNX model file
    /// * `tokenizer_path` - Path to tokenizer.json file
    /// * `model_name` - Human-readable model name (e.g., "all-MiniLM-L6-v2")
    /// * `dimension` - Embedding dimension (384 for small models, 768 for base models)
    /// * `query_prefix` - Optional prefix for query embeddings (asymmetric models)
    pub fn new_from_paths(
        model_path: &Path,
        tokenizer_path: &Path,
        model_name: &str,
        dimension: usize,
        query_prefix: Option<String>,
    ) -> Result<Self> {
        if !model_path.exists() {
            bail!("ONNX model not found at: {}", model_path.display());
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load ONNX model: {}", model_path.display()))?;

        if !tokenizer_path.exists() {
            bail!("Tokenizer not found at: {}", tokenizer_path.display());
        }

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;

        // Long major descriptions exceed the model's position table
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

        Ok(Self {
            session,
            tokenizer,
            dimension,
            model_name: model_name.to_string(),
            query_prefix,
        })
    }

    /// Tokenize text into input_ids and attention_mask
    fn tokenize(&self, text: &str) -> Result<(Vec<i64>, Vec<i64>)> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;

        let input_ids = encoding.get_ids().iter().map(|&x| x as i64).collect();
        let attention_mask = encoding
            .get_attention_mask()
            .iter()
            .map(|&x| x as i64)
            .collect();

        Ok((input_ids, attention_mask))
    }

    /// Mean pooling - average token embeddings weighted by attention mask
    fn mean_pooling(&self, token_embeddings: &Array2<f32>, attention_mask: &[i64]) -> Vec<f32> {
        let mask_sum: f32 = attention_mask.iter().map(|&x| x as f32).sum();

        if mask_sum == 0.0 {
            return vec![0.0; self.dimension];
        }

        let width = token_embeddings.ncols().min(self.dimension);
        let mut pooled = vec![0.0; self.dimension];
        for (i, &mask) in attention_mask.iter().enumerate() {
            if mask == 1 && i < token_embeddings.nrows() {
                for (j, slot) in pooled.iter_mut().enumerate().take(width) {
                    *slot += token_embeddings[[i, j]];
                }
            }
        }

        pooled.iter().map(|&x| x / mask_sum).collect()
    }
}

/// L2 normalize a vector
fn normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return vec.to_vec();
    }
    vec.iter().map(|x| x / norm).collect()
}

impl EmbeddingEngine for OnnxEmbedder {
    fn embed_query(&mut self, text: &str) -> Result<Vec<f32>> {
        let input = match &self.query_prefix {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text.to_string(),
        };
        self.embed(&input)
    }

    fn embed(&mut self, text: &str) -> Result<Vec<f32>> {
        let (input_ids, attention_mask) = self.tokenize(text)?;

        let seq_len = input_ids.len();
        let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
            .context("Failed to create input_ids array")?;
        let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())
            .context("Failed to create attention_mask array")?;
        // Single-sentence input: every token belongs to segment 0
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), vec![0i64; seq_len])
            .context("Failed to create token_type_ids array")?;

        let token_embeddings_2d = {
            let outputs = self
                .session
                .run(inputs![
                    "input_ids" => Value::from_array(input_ids_array)?,
                    "attention_mask" => Value::from_array(attention_mask_array)?,
                    "token_type_ids" => Value::from_array(token_type_ids_array)?
                ])
                .context("ONNX inference failed")?;

            let (shape, data) = outputs["last_hidden_state"]
                .try_extract_tensor::<f32>()
                .context("Failed to extract last_hidden_state tensor")?;

            // [batch_size=1, seq_len, hidden_dim]
            let shape_dims = shape.as_ref();
            if shape_dims.len() != 3 {
                bail!("Expected 3D tensor, got shape: {:?}", shape_dims);
            }

            let seq_len = shape_dims[1] as usize;
            let hidden_dim = shape_dims[2] as usize;
            let batch_offset = seq_len * hidden_dim;
            Array2::from_shape_vec((seq_len, hidden_dim), data[0..batch_offset].to_vec())
                .context("Failed to reshape token embeddings")?
        };

        let embedding = self.mean_pooling(&token_embeddings_2d, &attention_mask);
        Ok(normalize(&embedding))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
