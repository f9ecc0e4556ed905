use anyhow::Result;

use unirag::config::UniragConfig;
use unirag::retrieval::{format_sources, truncate_text, HybridRetriever, RetrievalResult};

pub fn execute(config: &UniragConfig, query: &str, k: Option<usize>, json: bool) -> Result<()> {
    let retriever = HybridRetriever::from_config(config);
    let k = k.unwrap_or(config.retrieval.k);

    let result = retriever.hybrid_search(query, k);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_summary(query, &result);
    Ok(())
}

fn print_summary(query: &str, result: &RetrievalResult) {
    println!("🔍 {}", query);
    println!("   Type: {}", result.query_type);
    match &result.major_info {
        Some(major) => println!("   Major: {} ({})", major.display_name, major.id),
        None => println!("   Major: -"),
    }
    println!("   Semantic results: {}", result.semantic_results.len());
    println!(
        "   Structured records: {}",
        result.structured_result.as_ref().map_or(0, |p| p.len())
    );

    if let Some(first) = result.semantic_results.first() {
        println!("\n📄 Top result: {}", truncate_text(&first.content, 200));
    }

    if result.is_empty() {
        println!("\nNo information found.");
        return;
    }

    println!("\n📚 Sources:\n{}", format_sources(&result.semantic_results));
    println!("\n--- Context ---\n{}", result.context);
}
