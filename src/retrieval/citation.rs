//! Source citations for display next to a generated answer

use crate::index::{DocType, Document};

/// Preview length shown per source
const PREVIEW_MAX_CHARS: usize = 150;

/// Message shown when nothing was retrieved
pub const NO_SOURCES: &str = "Không có nguồn tham khảo.";

/// One line per document: `Nguồn i. <header>` followed by a content preview
pub fn format_sources(docs: &[Document]) -> String {
    if docs.is_empty() {
        return NO_SOURCES.to_string();
    }

    docs.iter()
        .enumerate()
        .map(|(i, doc)| {
            format!(
                "Nguồn {}. {}\n   {}",
                i + 1,
                source_header(doc),
                truncate_text(&doc.content, PREVIEW_MAX_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header chosen by document type
fn source_header(doc: &Document) -> String {
    match doc.doc_type() {
        Some(DocType::Major) => format!(
            "Ngành {}",
            doc.meta("major_name").or(doc.meta("major_id")).unwrap_or("không rõ")
        ),
        Some(DocType::Faq) => match doc.meta("question") {
            Some(question) => format!("Câu hỏi thường gặp: {}", question),
            None => "Câu hỏi thường gặp".to_string(),
        },
        Some(other) => other.as_str().to_string(),
        None => doc.meta("type").unwrap_or("tài liệu").to_string(),
    }
}

/// Truncate to `max_chars` characters on a char boundary, collapsing newlines
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let collapsed = text.replace('\n', " ");
    let trimmed = collapsed.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let truncated: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
