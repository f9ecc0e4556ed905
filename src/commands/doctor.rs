use std::path::Path;

use unirag::config::UniragConfig;
use unirag::retrieval::HybridRetriever;

pub fn execute(config: &UniragConfig, config_path: &Path) {
    println!("🏥 Checking retrieval setup...");
    if config_path.exists() {
        println!("   Config: {}", config_path.display());
    } else {
        println!("   Config: {} (not found, using defaults)", config_path.display());
    }

    let problems = config.validate();
    if problems.is_empty() {
        println!("✅ Configuration looks good");
    } else {
        println!("⚠️  {} problem(s):", problems.len());
        for problem in &problems {
            println!("   - {}", problem);
        }
    }

    let retriever = HybridRetriever::from_config(config);

    let stats = retriever.structured().stats();
    println!("\n📦 Structured snapshot");
    for (name, count) in retriever.structured().score_datasets() {
        println!("   {:<28} {} records", name, count);
    }
    println!("   Score records:   {}", stats.score_records);
    println!("   Tuition groups:  {}", stats.tuition_groups);
    println!("   Combinations:    {}", stats.combinations);

    println!("\n🔎 Semantic index");
    if retriever.index().is_available() {
        println!("   Chunks: {}", retriever.index().len());
    } else {
        println!("   Unavailable (queries return no documents)");
    }

    println!("\n🔁 Reranker: {}", retriever.reranker_name());
    println!("👥 Programs: {}", retriever.registry().len());
}
