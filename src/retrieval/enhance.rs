//! Entity boosting: move documents about the matched program to the front

use crate::entity::Entity;
use crate::index::Document;

/// True if the document mentions the entity by id (metadata) or variant (content)
pub fn is_relevant(doc: &Document, entity: &Entity) -> bool {
    let id = entity.id.to_lowercase();
    if doc
        .metadata
        .values()
        .any(|value| value.to_lowercase().contains(&id))
    {
        return true;
    }
    entity.matches_lowered(&doc.content.to_lowercase())
}

/// Stable partition: relevant documents first, both groups in input order
///
/// No documents are dropped. Without an entity the input is returned as is.
pub fn enhance_with_major_context(entity: Option<&Entity>, docs: Vec<Document>) -> Vec<Document> {
    let Some(entity) = entity else {
        return docs;
    };

    let (mut relevant, other): (Vec<_>, Vec<_>) =
        docs.into_iter().partition(|doc| is_relevant(doc, entity));
    relevant.extend(other);
    relevant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marketing() -> Entity {
        Entity::new("ECON_MARKETING", "Marketing", "ECON", &["marketing", "tiếp thị"])
    }

    fn docs() -> Vec<Document> {
        vec![
            Document::new("Ngành du lịch").with_meta("major_id", "TOUR_TOURISM"),
            Document::new("Thông tin chung").with_meta("major_id", "ECON_MARKETING"),
            Document::new("Kế toán"),
            Document::new("Học TIẾP THỊ số"),
            Document::new("FAQ ký túc xá"),
        ]
    }

    #[test]
    fn test_relevant_docs_move_to_front_in_order() {
        let out = enhance_with_major_context(Some(&marketing()), docs());
        let contents: Vec<&str> = out.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(
            contents,
            vec![
                "Thông tin chung",
                "Học TIẾP THỊ số",
                "Ngành du lịch",
                "Kế toán",
                "FAQ ký túc xá"
            ]
        );
    }

    #[test]
    fn test_no_entity_is_identity() {
        assert_eq!(enhance_with_major_context(None, docs()), docs());
    }

    #[test]
    fn test_count_preserved() {
        let input = docs();
        let out = enhance_with_major_context(Some(&marketing()), input.clone());
        assert_eq!(out.len(), input.len());
        assert!(input.iter().all(|d| out.contains(d)));
    }
}
