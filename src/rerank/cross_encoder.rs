//! ONNX cross-encoder (ms-marco MiniLM family)
//!
//! Each (query, passage) pair is encoded as one sequence with segment ids and
//! scored in a single padded batch. The first logit of each row is the score.

use anyhow::{anyhow, bail, Context, Result};
use ndarray::Array2;
use ort::{inputs, session::Session, value::Value};
use parking_lot::Mutex;
use std::path::Path;
use tokenizers::Tokenizer;

use super::PairScorer;

pub struct OnnxCrossEncoder {
    // Session::run needs &mut; queries share the scorer
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl OnnxCrossEncoder {
    /// Load `model.onnx` and `tokenizer.json` from a model directory
    pub fn from_dir(model_dir: &Path, max_length: usize) -> Result<Self> {
        Self::new_from_paths(
            &model_dir.join("model.onnx"),
            &model_dir.join("tokenizer.json"),
            max_length,
        )
    }

    pub fn new_from_paths(model_path: &Path, tokenizer_path: &Path, max_length: usize) -> Result<Self> {
        if !model_path.exists() {
            bail!("Cross-encoder model not found at: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            bail!("Tokenizer not found at: {}", tokenizer_path.display());
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load cross-encoder: {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Encode pairs into zero-padded (ids, mask, type_ids) matrices
    fn encode_pairs(
        &self,
        query: &str,
        passages: &[&str],
    ) -> Result<(Array2<i64>, Array2<i64>, Array2<i64>)> {
        let encodings = passages
            .iter()
            .map(|passage| {
                self.tokenizer
                    .encode((query, *passage), true)
                    .map_err(|e| anyhow!("Tokenization failed: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = encodings.len();
        let width = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);

        let mut ids = Array2::<i64>::zeros((rows, width));
        let mut mask = Array2::<i64>::zeros((rows, width));
        let mut types = Array2::<i64>::zeros((rows, width));

        for (row, encoding) in encodings.iter().enumerate() {
            for (col, &id) in encoding.get_ids().iter().enumerate() {
                ids[[row, col]] = id as i64;
            }
            for (col, &m) in encoding.get_attention_mask().iter().enumerate() {
                mask[[row, col]] = m as i64;
            }
            for (col, &t) in encoding.get_type_ids().iter().enumerate() {
                types[[row, col]] = t as i64;
            }
        }

        Ok((ids, mask, types))
    }
}

impl PairScorer for OnnxCrossEncoder {
    fn score(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>> {
        if passages.is_empty() {
            return Ok(Vec::new());
        }

        let (ids, mask, types) = self.encode_pairs(query, passages)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs![
                "input_ids" => Value::from_array(ids)?,
                "attention_mask" => Value::from_array(mask)?,
                "token_type_ids" => Value::from_array(types)?
            ])
            .context("Cross-encoder inference failed")?;

        let (shape, data) = outputs["logits"]
            .try_extract_tensor::<f32>()
            .context("Failed to extract logits tensor")?;

        // [batch, num_labels]; ms-marco models have a single label
        let dims = shape.as_ref();
        if dims.is_empty() || dims[0] as usize != passages.len() {
            bail!("Unexpected logits shape: {:?}", dims);
        }
        let stride = if dims.len() > 1 { dims[1] as usize } else { 1 };

        Ok((0..passages.len()).map(|row| data[row * stride]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxCrossEncoder::from_dir(dir.path(), 512)
            .err()
            .expect("missing model must fail")
            .to_string();
        assert!(err.contains("Cross-encoder model not found"));
    }
}
