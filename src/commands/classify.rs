use std::sync::Arc;

use unirag::entity::EntityRegistry;
use unirag::retrieval::QueryClassifier;

pub fn execute(query: &str) {
    let registry = Arc::new(EntityRegistry::builtin());
    let classifier = QueryClassifier::new(registry.clone());

    println!("Type:  {}", classifier.classify(query));
    match registry.extract(query) {
        Some(entity) => println!(
            "Major: {} ({}, school {})",
            entity.display_name, entity.id, entity.school_id
        ),
        None => println!("Major: -"),
    }
}
