//! Engine configuration stored in `.unirag/config.toml`
//!
//! Every section and field carries a serde default, so a missing or partial
//! file still yields a usable configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".unirag/config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniragConfig {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub retrieval: RetrievalSection,
    #[serde(default)]
    pub embeddings: EmbeddingsSection,
    #[serde(default)]
    pub reranker: RerankerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    /// Directory produced by ingestion (documents + structured snapshot)
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
    /// Structured snapshot file name inside `index_dir`
    #[serde(default = "default_structured_file")]
    pub structured_file: String,
    /// Embedded chunk file name inside `index_dir`
    #[serde(default = "default_documents_file")]
    pub documents_file: String,
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("university_vector_db")
}
fn default_structured_file() -> String {
    "structured_data.json".to_string()
}
fn default_documents_file() -> String {
    "documents.json".to_string()
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
            structured_file: default_structured_file(),
            documents_file: default_documents_file(),
        }
    }
}

impl PathsSection {
    pub fn structured_path(&self) -> PathBuf {
        self.index_dir.join(&self.structured_file)
    }

    pub fn documents_path(&self) -> PathBuf {
        self.index_dir.join(&self.documents_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSection {
    /// Default number of semantic results per query
    #[serde(default = "default_k")]
    pub k: usize,
    /// Minimum similarity kept by `search_with_score`
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    /// Over-fetch factor applied before metadata post-filtering
    #[serde(default = "default_fetch_multiplier")]
    pub fetch_multiplier: usize,
    /// Snapshot keys containing this marker hold score datasets
    #[serde(default = "default_score_dataset_prefix")]
    pub score_dataset_prefix: String,
    /// Score records returned by the structured lookup
    #[serde(default = "default_max_scores")]
    pub max_scores: usize,
}

fn default_k() -> usize {
    5
}
fn default_similarity_threshold() -> f32 {
    0.5
}
fn default_fetch_multiplier() -> usize {
    4
}
fn default_score_dataset_prefix() -> String {
    "diem_".to_string()
}
fn default_max_scores() -> usize {
    10
}

impl Default for RetrievalSection {
    fn default() -> Self {
        Self {
            k: default_k(),
            similarity_threshold: default_similarity_threshold(),
            fetch_multiplier: default_fetch_multiplier(),
            score_dataset_prefix: default_score_dataset_prefix(),
            max_scores: default_max_scores(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsSection {
    /// Directory holding model.onnx (or model_quantized.onnx) and tokenizer.json
    #[serde(default = "default_embedding_model_dir")]
    pub model_dir: PathBuf,
    #[serde(default = "default_embedding_model_name")]
    pub model_name: String,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Prefix for asymmetric models (e.g. "query: " for E5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_prefix: Option<String>,
}

fn default_embedding_model_dir() -> PathBuf {
    PathBuf::from("models/all-minilm-l6-v2")
}
fn default_embedding_model_name() -> String {
    "all-MiniLM-L6-v2".to_string()
}
fn default_dimension() -> usize {
    384
}

impl Default for EmbeddingsSection {
    fn default() -> Self {
        Self {
            model_dir: default_embedding_model_dir(),
            model_name: default_embedding_model_name(),
            dimension: default_dimension(),
            query_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankerSection {
    #[serde(default)]
    pub enabled: bool,
    /// Directory holding the cross-encoder model.onnx and tokenizer.json
    #[serde(default = "default_reranker_model_dir")]
    pub model_dir: PathBuf,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Documents kept after reranking
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_reranker_model_dir() -> PathBuf {
    PathBuf::from("models/ms-marco-minilm-l6-v2")
}
fn default_max_length() -> usize {
    512
}
fn default_top_k() -> usize {
    5
}

impl Default for RerankerSection {
    fn default() -> Self {
        Self {
            enabled: false,
            model_dir: default_reranker_model_dir(),
            max_length: default_max_length(),
            top_k: default_top_k(),
        }
    }
}

impl UniragConfig {
    /// Load config from a TOML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {}", path.display()))
    }

    /// Advisory checks; the engine still starts with a degraded setup
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.paths.index_dir.exists() {
            problems.push(format!(
                "Index directory not found: {}",
                self.paths.index_dir.display()
            ));
        } else {
            if !self.paths.documents_path().exists() {
                problems.push(format!(
                    "Embedded documents not found: {}",
                    self.paths.documents_path().display()
                ));
            }
            if !self.paths.structured_path().exists() {
                problems.push(format!(
                    "Structured snapshot not found: {}",
                    self.paths.structured_path().display()
                ));
            }
        }

        if self.retrieval.k == 0 {
            problems.push("retrieval.k must be at least 1".to_string());
        }
        if self.retrieval.fetch_multiplier == 0 {
            problems.push("retrieval.fetch_multiplier must be at least 1".to_string());
        }

        if self.reranker.enabled {
            for file in ["model.onnx", "tokenizer.json"] {
                let path = self.reranker.model_dir.join(file);
                if !path.exists() {
                    problems.push(format!(
                        "Reranker enabled but {} is missing",
                        path.display()
                    ));
                }
            }
        }

        problems
    }
}
