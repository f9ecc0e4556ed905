//! Context assembly for the answer generator

use tracing::warn;

use super::result::RetrievalResult;

/// Metadata keys projected into the context, in output order
const CONTEXT_METADATA_KEYS: &[&str] = &["type", "major_id", "major_name", "school_id"];

/// Serialize a result into one text blob
///
/// Blocks appear in fixed order (entity, documents, structured data) and are
/// omitted entirely when empty.
pub fn build_context(result: &RetrievalResult) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(major) = &result.major_info {
        parts.push("=== THÔNG TIN NGÀNH ===".to_string());
        parts.push(format!("Ngành: {} ({})", major.display_name, major.id));
        parts.push(format!("Trường: {}\n", major.school_id));
    }

    if !result.semantic_results.is_empty() {
        parts.push("=== THÔNG TIN TỪ CƠ SỞ DỮ LIỆU ===".to_string());
        for (i, doc) in result.semantic_results.iter().enumerate() {
            parts.push(format!("\n[Nguồn {}]", i + 1));
            parts.push(doc.content.clone());

            let projected: Vec<String> = CONTEXT_METADATA_KEYS
                .iter()
                .filter_map(|key| doc.meta(key).map(|value| format!("{}: {}", key, value)))
                .collect();
            if !projected.is_empty() {
                parts.push(format!("[Metadata: {}]", projected.join(", ")));
            }
        }
    }

    if let Some(payload) = &result.structured_result {
        match serde_json::to_string_pretty(payload) {
            Ok(json) => {
                parts.push("\n=== DỮ LIỆU CHÍNH XÁC ===".to_string());
                parts.push(json);
            }
            Err(e) => warn!(error = %e, "failed to serialize structured payload"),
        }
    }

    parts.join("\n")
}
