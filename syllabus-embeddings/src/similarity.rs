//! Vector similarity helpers.

/// L2 norm of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity with precomputed norms.
///
/// `None` when the dimensions differ or either vector has zero norm.
pub fn cosine_with_norms(a: &[f32], norm_a: f32, b: &[f32], norm_b: f32) -> Option<f32> {
    if a.len() != b.len() || norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let sim = dot / (norm_a * norm_b);
    sim.is_finite().then_some(sim)
}
