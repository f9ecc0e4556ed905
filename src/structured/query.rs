//! Query parsing for structured lookups

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::entity::EntityRegistry;

/// Combination codes recognised in free text, in match priority order
pub const KNOWN_COMBINATION_CODES: &[&str] = &[
    "A00", "A01", "A02", "B00", "B01", "B02", "C00", "C01", "D01", "D02", "D03", "D04", "D05",
    "D06", "D07", "D14", "V00", "V01", "H00", "H01", "DD2",
];

/// First known combination code contained in the upper-cased query
pub fn find_combination_code(query: &str) -> Option<&'static str> {
    let upper = query.to_uppercase();
    KNOWN_COMBINATION_CODES
        .iter()
        .copied()
        .find(|code| upper.contains(code))
}

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"20\d{2}").expect("Invalid year regex"))
}

fn combination_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z]\d{2}").expect("Invalid combination regex"))
}

/// Filters parsed from a score question; absent fields don't filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreQuery {
    pub year: Option<u16>,
    pub combination_code: Option<String>,
    pub major_id: Option<String>,
    pub major_name: Option<String>,
    pub school_id: Option<String>,
}

impl ScoreQuery {
    pub fn parse(query: &str, registry: &EntityRegistry) -> Self {
        let year = year_regex()
            .find(query)
            .and_then(|m| m.as_str().parse().ok());
        let combination_code = combination_regex()
            .find(&query.to_uppercase())
            .map(|m| m.as_str().to_string());

        let entity = registry.extract(query);

        Self {
            year,
            combination_code,
            major_id: entity.map(|e| e.id.clone()),
            major_name: entity.map(|e| e.display_name.clone()),
            school_id: entity.map(|e| e.school_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_and_major() {
        let registry = EntityRegistry::builtin();
        let parsed = ScoreQuery::parse("điểm chuẩn ngành Trí tuệ nhân tạo năm 2024", &registry);
        assert_eq!(parsed.year, Some(2024));
        assert_eq!(parsed.major_id.as_deref(), Some("CS_AI"));
        assert_eq!(parsed.combination_code, None);
    }

    #[test]
    fn test_parse_combination_case_insensitive() {
        let registry = EntityRegistry::from_entities(Vec::new());
        let parsed = ScoreQuery::parse("điểm khối a01 năm 2023", &registry);
        assert_eq!(parsed.combination_code.as_deref(), Some("A01"));
        assert_eq!(parsed.year, Some(2023));
        assert_eq!(parsed.major_id, None);
    }

    #[test]
    fn test_first_year_wins() {
        let registry = EntityRegistry::from_entities(Vec::new());
        let parsed = ScoreQuery::parse("so sánh 2022 và 2024", &registry);
        assert_eq!(parsed.year, Some(2022));
    }

    #[test]
    fn test_find_combination_code_order() {
        assert_eq!(find_combination_code("Tổ hợp A00 gồm những môn nào?"), Some("A00"));
        assert_eq!(find_combination_code("khối d07 và a01"), Some("A01"));
        assert_eq!(find_combination_code("không có mã"), None);
    }
}
