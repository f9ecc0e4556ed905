//! Section-level content extraction from program documents
//!
//! A program document is a block of "Label: value" lines. Extraction keeps
//! the identifying header lines and the run of lines belonging to one
//! category, using a two-state machine:
//!
//! ```text
//!   Excluded --start keyword--> Included --stop keyword--> done
//! ```
//!
//! While included, blank lines are dropped. `Career` has no stop set and runs
//! to the end of the document.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Header labels copied from the first lines of a document
const HEADER_KEYWORDS: &[&str] = &["Tên ngành:", "Mã ngành", "Khoa:", "Tên trường"];
/// Only this many leading lines are checked for headers
const HEADER_SCAN_LINES: usize = 5;

/// Sub-section a query asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Career,
    Curriculum,
    Admission,
}

impl ContentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Curriculum => "curriculum",
            Self::Admission => "admission",
        }
    }

    /// Lower-case markers showing a document contains this category at all
    pub fn detect_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Career => &[
                "vị trí",
                "công việc",
                "nơi làm việc",
                "mức lương",
                "nghề nghiệp",
                "career",
                "positions",
                "workplace",
                "salary",
            ],
            Self::Curriculum => &[
                "học gì:",
                "môn đại cương:",
                "môn chuyên ngành:",
                "môn cơ sở ngành:",
                "các môn học tiêu biểu:",
            ],
            Self::Admission => &["phương thức xét tuyển"],
        }
    }

    /// Lines that open the section (case-sensitive)
    pub fn start_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Career => &[
                "Vị trí công việc",
                "Nơi làm việc",
                "Mức lương",
                "• Junior",
                "• Mid-level",
                "• Senior",
            ],
            Self::Curriculum => &[
                "Học gì:",
                "Môn đại cương:",
                "Môn chuyên ngành:",
                "Môn cơ sở ngành:",
                "Các môn học tiêu biểu:",
            ],
            Self::Admission => &[
                "Phương thức xét tuyển:",
                "Tổ hợp môn:",
                "Điều kiện đặc biệt:",
            ],
        }
    }

    /// Lines that close the section; empty means run to end of document
    pub fn stop_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Career => &[],
            Self::Curriculum => &[
                "Nhóm học phí:",
                "Học phí dự kiến:",
                "Phương thức xét tuyển:",
                "Vị trí công việc:",
            ],
            Self::Admission => &["Vị trí công việc"],
        }
    }

    /// True if the document mentions this category anywhere
    pub fn detect(&self, content: &str) -> bool {
        let lowered = content.to_lowercase();
        self.detect_keywords().iter().any(|kw| lowered.contains(kw))
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("document is empty")]
    EmptyContent,
    #[error("no {0} section found")]
    NoSection(ContentCategory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    Excluded,
    Included,
}

fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| line.contains(kw))
}

/// Extract the header lines plus the `category` section of a document
///
/// Start lines are always kept, even when already inside the section. A
/// document that mentions the category but has no start line yields its
/// header lines followed by an empty line.
pub fn extract_section(content: &str, category: ContentCategory) -> Result<String, ExtractError> {
    if content.trim().is_empty() {
        return Err(ExtractError::EmptyContent);
    }

    let lines: Vec<&str> = content.lines().collect();
    let start = category.start_keywords();
    let stop = category.stop_keywords();

    let mut header: Vec<&str> = lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .copied()
        .filter(|line| contains_any(line, HEADER_KEYWORDS))
        .collect();

    let mut section: Vec<&str> = Vec::new();
    let mut state = SectionState::Excluded;

    for &line in &lines {
        if contains_any(line, start) {
            state = SectionState::Included;
            section.push(line);
            continue;
        }

        if state == SectionState::Included {
            if contains_any(line, stop) {
                break;
            }
            if !line.trim().is_empty() {
                section.push(line);
            }
        }
    }

    // Nothing to show at all; a header alone is still a valid result
    if header.is_empty() && section.is_empty() {
        return Err(ExtractError::NoSection(category));
    }

    if !header.is_empty() {
        header.push("");
    }
    header.extend(section);
    Ok(header.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Tên ngành: Marketing
Mã ngành: 7340115
Khoa: Trường Kinh tế
Mô tả: Ngành đào tạo chuyên gia marketing.

Học gì:
- Nguyên lý marketing

Môn chuyên ngành:
- Nghiên cứu thị trường
Nhóm học phí: ECON
Học phí dự kiến: 30 triệu/năm
Phương thức xét tuyển:
- Xét học bạ
Tổ hợp môn: A00, D01
Vị trí công việc:
• Junior: Nhân viên marketing
• Senior: Giám đốc marketing
Mức lương: 10-40 triệu";

    #[test]
    fn test_curriculum_stops_at_tuition() {
        let out = extract_section(DOC, ContentCategory::Curriculum).unwrap();
        assert_eq!(
            out,
            "Tên ngành: Marketing\nMã ngành: 7340115\nKhoa: Trường Kinh tế\n\n\
             Học gì:\n- Nguyên lý marketing\nMôn chuyên ngành:\n- Nghiên cứu thị trường"
        );
    }

    #[test]
    fn test_career_runs_to_end() {
        let out = extract_section(DOC, ContentCategory::Career).unwrap();
        assert!(out.starts_with("Tên ngành: Marketing"));
        assert!(out.contains("Vị trí công việc:"));
        assert!(out.ends_with("Mức lương: 10-40 triệu"));
        assert!(!out.contains("Xét học bạ"));
    }

    #[test]
    fn test_admission_stops_at_career() {
        let out = extract_section(DOC, ContentCategory::Admission).unwrap();
        assert!(out.contains("Phương thức xét tuyển:\n- Xét học bạ\nTổ hợp môn: A00, D01"));
        assert!(!out.contains("Junior"));
        assert!(!out.contains("Học gì"));
    }

    #[test]
    fn test_header_only_from_first_lines() {
        let doc = "Giới thiệu\nA\nB\nC\nD\nTên ngành: muộn\nHọc gì:\n- Toán";
        let out = extract_section(doc, ContentCategory::Curriculum).unwrap();
        assert_eq!(out, "Học gì:\n- Toán");
    }

    #[test]
    fn test_missing_section_keeps_header() {
        let doc = "Tên ngành: Marketing\nKhoa: Trường Kinh tế\nGiới thiệu: nhiều công việc hấp dẫn.";
        assert!(ContentCategory::Career.detect(doc));
        assert_eq!(
            extract_section(doc, ContentCategory::Career),
            Ok("Tên ngành: Marketing\nKhoa: Trường Kinh tế\n".to_string())
        );
    }

    #[test]
    fn test_nothing_extractable_is_an_error() {
        let doc = "Giới thiệu: ngành du lịch\nMô tả: nhiều cơ hội";
        assert_eq!(
            extract_section(doc, ContentCategory::Career),
            Err(ExtractError::NoSection(ContentCategory::Career))
        );
        assert_eq!(
            extract_section("  \n", ContentCategory::Career),
            Err(ExtractError::EmptyContent)
        );
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert!(ContentCategory::Curriculum.detect("HỌC GÌ: toán"));
        assert!(ContentCategory::Admission.detect(DOC));
        assert!(!ContentCategory::Career.detect("Ngành học thú vị"));
    }

    #[test]
    fn test_combination_line_alone_is_not_admission() {
        assert!(!ContentCategory::Admission.detect("Tên ngành: Luật\nTổ hợp môn: C00, D01"));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            ExtractError::NoSection(ContentCategory::Admission).to_string(),
            "no admission section found"
        );
    }
}
