//! Structured data store - exact lookups over the ingestion snapshot
//!
//! The snapshot (`structured_data.json`) is a map from dataset name to
//! payload. Score datasets (keys containing the score prefix) hold
//! `{"data": [record, ...]}`; `hoc_phi` holds the tuition table and `to_hop`
//! the subject-combination catalogue. Everything is decoded once at load
//! time into typed records; lookups are pure functions over that snapshot.

mod query;
mod records;

pub use query::{find_combination_code, ScoreQuery, KNOWN_COMBINATION_CODES};
pub use records::{
    Combination, CombinationCatalog, ScoreRecord, StructuredRecord, TuitionCatalog, TuitionGroup,
};

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::RetrievalSection;
use crate::entity::{Entity, EntityRegistry};

/// Snapshot key of the tuition dataset
pub const TUITION_KEY: &str = "hoc_phi";
/// Snapshot key of the combination catalogue
pub const COMBINATIONS_KEY: &str = "to_hop";

/// Tuition group id -> owning school id
const GROUP_SCHOOLS: &[(&str, &str)] = &[
    ("CNTT", "CS"),
    ("ECON", "ECON"),
    ("MED", "MED"),
    ("TOUR", "TOUR"),
    ("LANG", "LANG"),
    ("ENG", "ENG"),
];

fn group_belongs_to_school(group_id: &str, school_id: &str) -> bool {
    GROUP_SCHOOLS
        .iter()
        .any(|(group, school)| *group == group_id && *school == school_id)
}

/// One named score dataset, e.g. `diem_chuan_2024`
#[derive(Debug, Clone)]
struct ScoreDataset {
    name: String,
    records: Vec<ScoreRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreLookup {
    /// Newest first, at most `max_scores`
    pub scores: Vec<ScoreRecord>,
    /// Matches before truncation
    pub total: usize,
    pub query_info: ScoreQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationLookup {
    pub description: String,
    pub combinations: Vec<Combination>,
    /// Size of the whole catalogue, filtered or not
    pub total: usize,
    pub found_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuitionLookup {
    pub university: String,
    pub currency: String,
    pub calculation_method: String,
    pub tuition_groups: Vec<TuitionGroup>,
    pub notes: Vec<String>,
}

/// Per-kind record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub score_datasets: usize,
    pub score_records: usize,
    pub tuition_groups: usize,
    pub combinations: usize,
}

/// Read-only structured snapshot
#[derive(Debug, Clone)]
pub struct StructuredDataStore {
    score_datasets: Vec<ScoreDataset>,
    tuition: Option<TuitionCatalog>,
    combinations: Option<CombinationCatalog>,
    max_scores: usize,
}

impl StructuredDataStore {
    pub fn empty() -> Self {
        Self {
            score_datasets: Vec::new(),
            tuition: None,
            combinations: None,
            max_scores: RetrievalSection::default().max_scores,
        }
    }

    /// Load the snapshot; a missing or corrupt file yields an empty store
    pub fn load(path: &Path, settings: &RetrievalSection) -> Self {
        if !path.exists() {
            warn!(path = %path.display(), "structured snapshot not found, structured lookups disabled");
            return Self::empty();
        }

        match Self::load_strict(path, settings) {
            Ok(store) => {
                let stats = store.stats();
                info!(
                    score_records = stats.score_records,
                    tuition_groups = stats.tuition_groups,
                    combinations = stats.combinations,
                    "structured snapshot loaded"
                );
                store
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "structured snapshot unreadable, structured lookups disabled");
                Self::empty()
            }
        }
    }

    /// Load the snapshot, propagating read and parse errors
    pub fn load_strict(path: &Path, settings: &RetrievalSection) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read structured snapshot: {}", path.display()))?;
        Self::from_json_str(&raw, settings)
            .with_context(|| format!("Failed to parse structured snapshot: {}", path.display()))
    }

    pub fn from_json_str(raw: &str, settings: &RetrievalSection) -> Result<Self> {
        let snapshot: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(raw).context("Snapshot is not a JSON object")?;

        let mut store = Self {
            max_scores: settings.max_scores,
            ..Self::empty()
        };

        for (name, value) in snapshot {
            if name == TUITION_KEY {
                match serde_json::from_value::<TuitionCatalog>(value) {
                    Ok(catalog) => store.tuition = Some(catalog),
                    Err(e) => warn!(dataset = %name, error = %e, "skipping malformed tuition dataset"),
                }
            } else if name == COMBINATIONS_KEY {
                match serde_json::from_value::<CombinationCatalog>(value) {
                    Ok(catalog) => store.combinations = Some(catalog),
                    Err(e) => warn!(dataset = %name, error = %e, "skipping malformed combination dataset"),
                }
            } else if name.contains(&settings.score_dataset_prefix) {
                if let Some(dataset) = decode_score_dataset(&name, value) {
                    store.score_datasets.push(dataset);
                }
            } else {
                debug!(dataset = %name, "ignoring unknown dataset");
            }
        }

        Ok(store)
    }

    pub fn is_empty(&self) -> bool {
        self.score_datasets.is_empty() && self.tuition.is_none() && self.combinations.is_none()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            score_datasets: self.score_datasets.len(),
            score_records: self.score_datasets.iter().map(|d| d.records.len()).sum(),
            tuition_groups: self
                .tuition
                .as_ref()
                .map_or(0, |t| t.tuition_groups.len()),
            combinations: self
                .combinations
                .as_ref()
                .map_or(0, |c| c.combinations.len()),
        }
    }

    /// Score dataset names with their record counts, in snapshot key order
    pub fn score_datasets(&self) -> impl Iterator<Item = (&str, usize)> {
        self.score_datasets
            .iter()
            .map(|d| (d.name.as_str(), d.records.len()))
    }

    /// Every decoded record: scores, then tuition groups, then combinations
    pub fn records(&self) -> impl Iterator<Item = StructuredRecord<'_>> {
        let scores = self
            .score_datasets
            .iter()
            .flat_map(|d| d.records.iter())
            .map(StructuredRecord::Score);
        let groups = self
            .tuition
            .iter()
            .flat_map(|t| t.tuition_groups.iter())
            .map(StructuredRecord::TuitionGroup);
        let combos = self
            .combinations
            .iter()
            .flat_map(|c| c.combinations.iter())
            .map(StructuredRecord::Combination);
        scores.chain(groups).chain(combos)
    }

    /// Cutoff scores matching the year / major / combination in the query
    pub fn lookup_scores(&self, query: &str, registry: &EntityRegistry) -> Option<ScoreLookup> {
        self.lookup_scores_with(&ScoreQuery::parse(query, registry))
    }

    pub fn lookup_scores_with(&self, parsed: &ScoreQuery) -> Option<ScoreLookup> {
        let major_name = parsed.major_name.as_ref().map(|n| n.to_lowercase());

        let mut matched: Vec<ScoreRecord> = self
            .score_datasets
            .iter()
            .flat_map(|d| d.records.iter())
            .filter(|r| parsed.year.map_or(true, |y| r.year == y))
            .filter(|r| match (&parsed.major_id, &major_name) {
                (Some(id), _) => &r.major_id == id,
                (None, Some(name)) => r.major_name.to_lowercase().contains(name.as_str()),
                (None, None) => true,
            })
            .filter(|r| {
                parsed
                    .combination_code
                    .as_ref()
                    .map_or(true, |code| r.combination_code.as_ref() == Some(code))
            })
            .cloned()
            .collect();

        if matched.is_empty() {
            debug!(?parsed, "no score records matched");
            return None;
        }

        // Stable: same-year records keep snapshot order
        matched.sort_by(|a, b| b.year.cmp(&a.year));
        let total = matched.len();
        matched.truncate(self.max_scores);

        Some(ScoreLookup {
            scores: matched,
            total,
            query_info: parsed.clone(),
        })
    }

    /// Combination catalogue, narrowed to the first known code in the query
    pub fn lookup_combinations(&self, query: &str) -> Option<CombinationLookup> {
        let catalog = self.combinations.as_ref()?;
        let found_code = find_combination_code(query);

        let combinations = match found_code {
            Some(code) => catalog
                .combinations
                .iter()
                .filter(|c| c.code == code)
                .cloned()
                .collect(),
            None => catalog.combinations.clone(),
        };

        Some(CombinationLookup {
            description: catalog.description.clone(),
            combinations,
            total: catalog.combinations.len(),
            found_code: found_code.map(str::to_string),
        })
    }

    /// Tuition table, narrowed to the entity's groups when one is given
    pub fn lookup_tuition(&self, entity: Option<&Entity>) -> Option<TuitionLookup> {
        let catalog = self.tuition.as_ref()?;

        let tuition_groups = match entity {
            Some(entity) => catalog
                .tuition_groups
                .iter()
                .filter(|g| {
                    g.major_ids.iter().any(|id| id == &entity.id)
                        || group_belongs_to_school(&g.group_id, &entity.school_id)
                })
                .cloned()
                .collect(),
            None => catalog.tuition_groups.clone(),
        };

        Some(TuitionLookup {
            university: catalog.university.clone(),
            currency: catalog.currency.clone(),
            calculation_method: catalog.calculation_method.clone(),
            tuition_groups,
            notes: catalog.notes.clone(),
        })
    }
}

impl Default for StructuredDataStore {
    fn default() -> Self {
        Self::empty()
    }
}

fn decode_score_dataset(name: &str, value: serde_json::Value) -> Option<ScoreDataset> {
    let serde_json::Value::Object(mut body) = value else {
        debug!(dataset = %name, "score dataset is not an object, ignoring");
        return None;
    };
    let Some(serde_json::Value::Array(rows)) = body.remove("data") else {
        debug!(dataset = %name, "score dataset has no data array, ignoring");
        return None;
    };

    let mut skipped = 0usize;
    let records: Vec<ScoreRecord> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!(dataset = %name, skipped, "skipped malformed score records");
    }

    Some(ScoreDataset {
        name: name.to_string(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "diem_chuan_2023": {"data": [
            {"major_id": "CS_AI", "major_name": "Trí tuệ nhân tạo", "year": 2023, "to_hop": "A00", "diem_chuan": 24.0},
            {"major_id": "CS_SE", "major_name": "Kỹ thuật phần mềm", "year": 2023, "to_hop": "A01", "diem_chuan": 23.5}
        ]},
        "diem_chuan_2024.json": {"data": [
            {"major_id": "CS_AI", "major_name": "Trí tuệ nhân tạo", "year": 2024, "to_hop": "A00", "diem_chuan": 25.0},
            {"major_id": "CS_AI", "major_name": "Trí tuệ nhân tạo", "year": 2024, "to_hop": "A01", "diem_chuan": 25.5},
            {"major_id": "CS_SE", "major_name": "Kỹ thuật phần mềm", "year": 2024, "to_hop": "A00", "diem_chuan": 24.0}
        ]},
        "hoc_phi": {
            "university": "Đại học Duy Tân",
            "calculation_method": "Theo tín chỉ",
            "tuition_groups": [
                {"group_id": "CNTT", "major_ids": ["CS_SE"], "estimated_per_year": 30000000},
                {"group_id": "MED", "major_ids": ["MED_DOCTOR"], "estimated_per_year": 80000000},
                {"group_id": "SPECIAL", "major_ids": ["CS_AI"], "estimated_per_year": 35000000}
            ],
            "notes": ["Học phí có thể thay đổi"]
        },
        "to_hop": {
            "description": "Các tổ hợp xét tuyển",
            "combinations": [
                {"code": "A00", "subjects": ["Toán", "Vật lý", "Hóa học"]},
                {"code": "A01", "subjects": ["Toán", "Vật lý", "Tiếng Anh"]},
                {"code": "D01", "subjects": ["Toán", "Ngữ văn", "Tiếng Anh"]}
            ]
        },
        "gioi_thieu": {"text": "ignored"}
    }"#;

    fn store() -> StructuredDataStore {
        StructuredDataStore::from_json_str(SNAPSHOT, &RetrievalSection::default()).unwrap()
    }

    #[test]
    fn test_stats() {
        let stats = store().stats();
        assert_eq!(stats.score_datasets, 2);
        assert_eq!(stats.score_records, 5);
        assert_eq!(stats.tuition_groups, 3);
        assert_eq!(stats.combinations, 3);
        assert_eq!(store().records().count(), 11);
    }

    #[test]
    fn test_scores_by_year_and_major() {
        let registry = EntityRegistry::builtin();
        let result = store()
            .lookup_scores("điểm chuẩn ngành Trí tuệ nhân tạo năm 2024", &registry)
            .unwrap();
        assert_eq!(result.total, 2);
        assert!(result
            .scores
            .iter()
            .all(|s| s.year == 2024 && s.major_id == "CS_AI"));
        assert_eq!(result.query_info.year, Some(2024));
    }

    #[test]
    fn test_scores_sorted_newest_first() {
        let registry = EntityRegistry::builtin();
        let result = store()
            .lookup_scores("điểm chuẩn trí tuệ nhân tạo", &registry)
            .unwrap();
        let years: Vec<u16> = result.scores.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2024, 2024, 2023]);
        // Same-year records keep their snapshot order
        assert_eq!(result.scores[0].combination_code.as_deref(), Some("A00"));
        assert_eq!(result.scores[1].combination_code.as_deref(), Some("A01"));
    }

    #[test]
    fn test_scores_filter_by_combination() {
        let registry = EntityRegistry::from_entities(Vec::new());
        let result = store().lookup_scores("điểm khối A01", &registry).unwrap();
        assert_eq!(result.total, 2);
        assert!(result
            .scores
            .iter()
            .all(|s| s.combination_code.as_deref() == Some("A01")));
    }

    #[test]
    fn test_scores_by_major_name_when_no_id() {
        let parsed = ScoreQuery {
            major_name: Some("PHẦN MỀM".to_string()),
            ..Default::default()
        };
        let result = store().lookup_scores_with(&parsed).unwrap();
        assert_eq!(result.total, 2);
        assert!(result.scores.iter().all(|s| s.major_id == "CS_SE"));
    }

    #[test]
    fn test_scores_truncated_but_total_counts_all() {
        let settings = RetrievalSection {
            max_scores: 2,
            ..Default::default()
        };
        let store = StructuredDataStore::from_json_str(SNAPSHOT, &settings).unwrap();
        let result = store.lookup_scores_with(&ScoreQuery::default()).unwrap();
        assert_eq!(result.scores.len(), 2);
        assert_eq!(result.total, 5);
    }

    #[test]
    fn test_scores_miss_is_none() {
        let registry = EntityRegistry::builtin();
        assert!(store()
            .lookup_scores("điểm chuẩn trí tuệ nhân tạo 2019", &registry)
            .is_none());
    }

    #[test]
    fn test_combinations_filtered_by_code() {
        let result = store()
            .lookup_combinations("Tổ hợp A00 gồm những môn nào?")
            .unwrap();
        assert_eq!(result.combinations.len(), 1);
        assert_eq!(result.combinations[0].code, "A00");
        assert_eq!(result.total, 3);
        assert_eq!(result.found_code.as_deref(), Some("A00"));
    }

    #[test]
    fn test_combinations_full_catalogue_without_code() {
        let result = store().lookup_combinations("có những tổ hợp nào").unwrap();
        assert_eq!(result.combinations.len(), 3);
        assert_eq!(result.found_code, None);
    }

    #[test]
    fn test_tuition_by_major_and_school_mapping() {
        let registry = EntityRegistry::builtin();
        let se = registry.get("CS_SE").unwrap();
        let result = store().lookup_tuition(Some(se)).unwrap();
        let groups: Vec<&str> = result.tuition_groups.iter().map(|g| g.group_id.as_str()).collect();
        assert_eq!(groups, vec!["CNTT"]);

        let ai = registry.get("CS_AI").unwrap();
        let result = store().lookup_tuition(Some(ai)).unwrap();
        let groups: Vec<&str> = result.tuition_groups.iter().map(|g| g.group_id.as_str()).collect();
        assert_eq!(groups, vec!["SPECIAL"]);
    }

    #[test]
    fn test_tuition_group_matched_through_school_table() {
        let registry = EntityRegistry::builtin();
        // Not listed in any group's major_ids, but CS maps to the CNTT group
        let cs = registry.get("CS_CS").unwrap();
        let result = store().lookup_tuition(Some(cs)).unwrap();
        assert_eq!(result.tuition_groups.len(), 1);
        assert_eq!(result.tuition_groups[0].group_id, "CNTT");
        assert_eq!(result.currency, "VND");
    }

    #[test]
    fn test_tuition_without_entity_returns_all_groups() {
        let result = store().lookup_tuition(None).unwrap();
        assert_eq!(result.tuition_groups.len(), 3);
    }

    #[test]
    fn test_empty_store_lookups() {
        let store = StructuredDataStore::empty();
        let registry = EntityRegistry::builtin();
        assert!(store.is_empty());
        assert!(store.lookup_scores("điểm chuẩn 2024", &registry).is_none());
        assert!(store.lookup_combinations("A00").is_none());
        assert!(store.lookup_tuition(None).is_none());
    }

    #[test]
    fn test_load_missing_and_corrupt_degrade() {
        let dir = tempfile::tempdir().unwrap();
        let settings = RetrievalSection::default();

        let missing = StructuredDataStore::load(&dir.path().join("none.json"), &settings);
        assert!(missing.is_empty());

        let corrupt_path = dir.path().join("structured_data.json");
        fs::write(&corrupt_path, "{ not json").unwrap();
        assert!(StructuredDataStore::load(&corrupt_path, &settings).is_empty());
        assert!(StructuredDataStore::load_strict(&corrupt_path, &settings).is_err());
    }
}
