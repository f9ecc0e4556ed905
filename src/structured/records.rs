//! Typed records decoded from the structured snapshot

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Cutoff score for one (major, year, combination)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub major_id: String,
    #[serde(default)]
    pub major_name: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: u16,
    #[serde(default, alias = "to_hop", skip_serializing_if = "Option::is_none")]
    pub combination_code: Option<String>,
    #[serde(
        default,
        alias = "diem_chuan",
        alias = "score",
        deserialize_with = "lenient_score"
    )]
    pub cutoff_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

/// Tuition bracket shared by a set of majors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuitionGroup {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub major_ids: Vec<String>,
    /// Number or free text ("35-40 triệu"), kept as written
    #[serde(
        default,
        alias = "per_year_estimate",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_per_year: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// University-wide tuition table (`hoc_phi` dataset)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuitionCatalog {
    #[serde(default)]
    pub university: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub calculation_method: String,
    #[serde(default)]
    pub tuition_groups: Vec<TuitionGroup>,
    #[serde(default)]
    pub notes: Vec<String>,
}

fn default_currency() -> String {
    "VND".to_string()
}

/// Subject combination, e.g. A00 = Toán, Lý, Hóa
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub code: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// Subject-combination catalogue (`to_hop` dataset)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationCatalog {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub combinations: Vec<Combination>,
}

/// Tagged view over every decoded record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredRecord<'a> {
    Score(&'a ScoreRecord),
    TuitionGroup(&'a TuitionGroup),
    Combination(&'a Combination),
}

fn lenient_year<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|y| u16::try_from(y).ok()).unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        // Some sources write "25,5"
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    })
}
