use anyhow::Result;

use unirag::config::UniragConfig;
use unirag::entity::EntityRegistry;
use unirag::structured::{ScoreQuery, StructuredDataStore};

pub fn execute(config: &UniragConfig, query: &str) -> Result<()> {
    let store = StructuredDataStore::load(&config.paths.structured_path(), &config.retrieval);
    let registry = EntityRegistry::builtin();
    let parsed = ScoreQuery::parse(query, &registry);

    match store.lookup_scores_with(&parsed) {
        Some(lookup) => println!("{}", serde_json::to_string_pretty(&lookup)?),
        None => {
            eprintln!("No cutoff scores matched.");
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}
