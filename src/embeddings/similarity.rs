//! Similarity metric for embeddings

/// Compute cosine similarity between two embedding vectors
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 = identical vectors
/// - 0.0 = orthogonal vectors (or either vector is all zeros)
/// - -1.0 = opposite vectors
///
/// # Panics
/// Panics if vectors have different dimensions
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "Vectors must have same dimension: {} vs {}",
        a.len(),
        b.len()
    );

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
