//! Query type detection
//!
//! Classification walks an ordered rule table and returns the tag of the
//! first rule that fires, falling back to `Faq`. The table is fixed, so the
//! result is a pure function of the query text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::entity::EntityRegistry;
use crate::structured::KNOWN_COMBINATION_CODES;

/// Query type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Admission cutoff scores
    CutoffScores,
    /// Subject combination codes (A00, D01, ...)
    SubjectCombinations,
    Tuition,
    /// Jobs and salaries after graduation
    Career,
    /// What is taught in the program
    Curriculum,
    AdmissionMethods,
    /// General questions about a named program
    MajorInfo,
    #[default]
    Faq,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CutoffScores => "cutoff_scores",
            Self::SubjectCombinations => "subject_combinations",
            Self::Tuition => "tuition",
            Self::Career => "career",
            Self::Curriculum => "curriculum",
            Self::AdmissionMethods => "admission_methods",
            Self::MajorInfo => "major_info",
            Self::Faq => "faq",
        }
    }

    /// Parse a type name (for CLI parameters)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cutoff_scores" | "cutoff" | "scores" => Some(Self::CutoffScores),
            "subject_combinations" | "combinations" => Some(Self::SubjectCombinations),
            "tuition" => Some(Self::Tuition),
            "career" => Some(Self::Career),
            "curriculum" | "curriculum_major" => Some(Self::Curriculum),
            "admission_methods" | "admission" => Some(Self::AdmissionMethods),
            "major_info" | "major" => Some(Self::MajorInfo),
            "faq" => Some(Self::Faq),
            _ => None,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What makes a rule fire
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Any keyword in the lower-cased query
    Keywords(&'static [&'static str]),
    /// Any keyword, or a known combination code in the upper-cased query
    KeywordsOrCombinationCode(&'static [&'static str]),
    /// Any keyword, or any registry entity matches
    KeywordsOrEntity(&'static [&'static str]),
}

/// One (tag, predicate) row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub query_type: QueryType,
    pub trigger: Trigger,
}

impl Rule {
    pub fn fires(&self, query: &str, registry: &EntityRegistry) -> bool {
        let lowered = query.to_lowercase();
        let any_keyword = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));

        match self.trigger {
            Trigger::Keywords(keywords) => any_keyword(keywords),
            Trigger::KeywordsOrCombinationCode(keywords) => {
                any_keyword(keywords) || {
                    let upper = query.to_uppercase();
                    KNOWN_COMBINATION_CODES.iter().any(|code| upper.contains(code))
                }
            }
            Trigger::KeywordsOrEntity(keywords) => {
                any_keyword(keywords) || registry.iter().any(|e| e.matches_lowered(&lowered))
            }
        }
    }
}

const CUTOFF_KEYWORDS: &[&str] = &[
    "điểm chuẩn",
    "diem chuan",
    "điểm đầu vào",
    "diem dau vao",
    "điểm trúng tuyển",
    "diem trung tuyen",
];

const COMBINATION_KEYWORDS: &[&str] = &["tổ hợp", "to hop", "môn thi", "mon thi"];

const TUITION_KEYWORDS: &[&str] = &["học phí", "hoc phi", "mức phí", "muc phi", "chi phí", "chi phi"];

// Checked before curriculum: "ra trường làm gì" must not read as "học gì"
const CAREER_KEYWORDS: &[&str] = &[
    "làm gì",
    "lam gi",
    "ra trường",
    "ra truong",
    "nghề nghiệp",
    "nghe nghiep",
    "việc làm",
    "viec lam",
    "công việc",
    "cong viec",
    "vị trí công việc",
];

const CURRICULUM_KEYWORDS: &[&str] = &[
    "học gì",
    "hoc gi",
    "học những",
    "hoc nhung",
    "môn gì",
    "mon gi",
    "môn học",
    "mon hoc",
    "chương trình",
    "chuong trinh",
    "curriculum",
];

const ADMISSION_KEYWORDS: &[&str] = &[
    "phương thức",
    "phuong thuc",
    "xét tuyển",
    "xet tuyen",
    "tuyển sinh",
    "tuyen sinh",
    "đăng ký",
    "dang ky",
];

const MAJOR_KEYWORDS: &[&str] = &["ngành", "nganh", "chuyên ngành", "chuyen nganh", "major"];

/// The fixed-priority classification table
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        query_type: QueryType::CutoffScores,
        trigger: Trigger::Keywords(CUTOFF_KEYWORDS),
    },
    Rule {
        query_type: QueryType::SubjectCombinations,
        trigger: Trigger::KeywordsOrCombinationCode(COMBINATION_KEYWORDS),
    },
    Rule {
        query_type: QueryType::Tuition,
        trigger: Trigger::Keywords(TUITION_KEYWORDS),
    },
    Rule {
        query_type: QueryType::Career,
        trigger: Trigger::Keywords(CAREER_KEYWORDS),
    },
    Rule {
        query_type: QueryType::Curriculum,
        trigger: Trigger::Keywords(CURRICULUM_KEYWORDS),
    },
    Rule {
        query_type: QueryType::AdmissionMethods,
        trigger: Trigger::Keywords(ADMISSION_KEYWORDS),
    },
    Rule {
        query_type: QueryType::MajorInfo,
        trigger: Trigger::KeywordsOrEntity(MAJOR_KEYWORDS),
    },
];

/// Maps a query to exactly one `QueryType`
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    rules: Vec<Rule>,
    registry: Arc<EntityRegistry>,
}

impl QueryClassifier {
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec(), registry)
    }

    pub fn with_rules(rules: Vec<Rule>, registry: Arc<EntityRegistry>) -> Self {
        Self { rules, registry }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, query: &str) -> QueryType {
        self.rules
            .iter()
            .find(|rule| rule.fires(query, &self.registry))
            .map(|rule| rule.query_type)
            .unwrap_or(QueryType::Faq)
    }
}
