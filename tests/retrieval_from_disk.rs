//! Loading an ingestion output directory from disk

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use unirag::config::{RetrievalSection, UniragConfig};
use unirag::embeddings::EmbeddingEngine;
use unirag::entity::EntityRegistry;
use unirag::index::{FlatVectorStore, SemanticIndex};
use unirag::retrieval::{HybridRetriever, QueryType, StructuredPayload};
use unirag::structured::StructuredDataStore;

/// Three fixed topics: cutoff scores, dormitory, everything else
struct TopicEmbedder;

impl EmbeddingEngine for TopicEmbedder {
    fn embed(&mut self, text: &str) -> Result<Vec<f32>> {
        let lowered = text.to_lowercase();
        Ok(if lowered.contains("điểm") {
            vec![1.0, 0.0, 0.0]
        } else if lowered.contains("ký túc xá") {
            vec![0.0, 1.0, 0.0]
        } else {
            vec![0.0, 0.0, 1.0]
        })
    }

    fn dimension(&self) -> usize {
        3
    }

    fn model_name(&self) -> &str {
        "topic"
    }
}

const DOCUMENTS: &str = r#"[
    {"content": "Ký túc xá nằm tại cơ sở Hòa Khánh.",
     "metadata": {"type": "faq", "question": "Ký túc xá ở đâu?"},
     "embedding": [0.0, 1.0, 0.0]},
    {"content": "Điểm chuẩn Trí tuệ nhân tạo 2024 tăng nhẹ.",
     "metadata": {"type": "cutoff_analysis", "major_id": "CS_AI", "year": 2024, "note": null},
     "embedding": [1.0, 0.0, 0.0]},
    {"content": "Tên ngành: Trí tuệ nhân tạo",
     "metadata": {"type": "major", "major_id": "CS_AI", "school_id": "CS"},
     "embedding": [0.2, 0.0, 1.0]},
    {"content": "Chunk from an older model",
     "metadata": {"type": "faq"},
     "embedding": [1.0, 0.0]}
]"#;

const SNAPSHOT: &str = r#"{
    "diem_chuan_2024": {"data": [
        {"major_id": "CS_AI", "major_name": "Trí tuệ nhân tạo", "year": "2024", "to_hop": "A00", "diem_chuan": "25,5"},
        {"major_id": "CS_AI", "major_name": "Trí tuệ nhân tạo", "year": 2024, "to_hop": "A01", "diem_chuan": 25.0}
    ]},
    "to_hop": {"description": "Các tổ hợp", "combinations": [
        {"code": "A00", "subjects": ["Toán", "Vật lý", "Hóa học"]}
    ]}
}"#;

fn write_index_dir(dir: &Path) {
    fs::write(dir.join("documents.json"), DOCUMENTS).unwrap();
    fs::write(dir.join("structured_data.json"), SNAPSHOT).unwrap();
}

fn retriever(dir: &Path) -> HybridRetriever {
    let store = FlatVectorStore::load(&dir.join("documents.json"), Box::new(TopicEmbedder)).unwrap();
    let structured =
        StructuredDataStore::load(&dir.join("structured_data.json"), &RetrievalSection::default());
    HybridRetriever::new(
        Arc::new(EntityRegistry::builtin()),
        structured,
        SemanticIndex::new(Box::new(store)),
    )
}

#[test]
fn test_flat_store_metadata_is_stringified() {
    let dir = TempDir::new().unwrap();
    write_index_dir(dir.path());

    let store = FlatVectorStore::load(&dir.path().join("documents.json"), Box::new(TopicEmbedder)).unwrap();
    let index = SemanticIndex::new(Box::new(store));
    assert_eq!(index.len(), 4);

    let docs = index.search("điểm chuẩn", 1, None);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].meta("year"), Some("2024"));
    assert_eq!(docs[0].meta("note"), None);
}

#[test]
fn test_faq_query_from_disk() {
    let dir = TempDir::new().unwrap();
    write_index_dir(dir.path());

    let result = retriever(dir.path()).hybrid_search("ký túc xá ở đâu?", 5);

    assert_eq!(result.query_type, QueryType::Faq);
    // The stale chunk has the wrong dimension and is never returned
    assert_eq!(result.semantic_results.len(), 1);
    assert!(result.semantic_results[0].content.contains("Hòa Khánh"));
}

#[test]
fn test_cutoff_query_from_disk() {
    let dir = TempDir::new().unwrap();
    write_index_dir(dir.path());

    let result = retriever(dir.path()).hybrid_search("điểm chuẩn ngành trí tuệ nhân tạo 2024", 5);

    assert_eq!(result.query_type, QueryType::CutoffScores);
    assert_eq!(result.semantic_results.len(), 1);
    assert_eq!(result.semantic_results[0].meta("type"), Some("cutoff_analysis"));

    let Some(StructuredPayload::Scores(scores)) = &result.structured_result else {
        panic!("expected scores, got {:?}", result.structured_result);
    };
    assert_eq!(scores.total, 2);
    assert!(scores
        .scores
        .iter()
        .any(|s| s.cutoff_score.is_some_and(|v| (v - 25.5).abs() < 1e-9)));
}

#[test]
fn test_from_config_degrades_without_model() {
    let dir = TempDir::new().unwrap();
    write_index_dir(dir.path());

    let config_path = dir.path().join("config.toml");
    let toml = format!(
        "[paths]\nindex_dir = {:?}\n\n[embeddings]\nmodel_dir = {:?}\n\n[reranker]\nenabled = false\n",
        dir.path().to_string_lossy(),
        dir.path().join("no-model").to_string_lossy(),
    );
    fs::write(&config_path, toml).unwrap();

    let config = UniragConfig::load(&config_path).unwrap();
    let retriever = HybridRetriever::from_config(&config);

    assert!(!retriever.index().is_available());
    assert_eq!(retriever.structured().stats().score_records, 2);
    assert_eq!(retriever.reranker_name(), "none");

    let result = retriever.hybrid_search("tổ hợp A00 gồm những môn nào", 5);
    assert_eq!(result.query_type, QueryType::SubjectCombinations);
    assert!(result.semantic_results.is_empty());
    assert!(result.structured_result.is_some());
}
