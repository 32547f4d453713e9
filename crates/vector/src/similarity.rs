use ndarray::ArrayView1;
use reviewrag_common::DistanceMetric;

/// Squared L2 distance. Both slices must have the same length.
pub fn squared_euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);
    let diff = &a - &b;
    diff.dot(&diff)
}

/// L2 distance. Both slices must have the same length.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    squared_euclidean_distance(a, b).sqrt()
}

/// Cosine similarity in [-1, 1]; 0 when either vector is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Distance between `a` and `b` under `metric`. Lower is more similar.
pub fn distance(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        DistanceMetric::Euclidean => euclidean_distance(a, b),
        DistanceMetric::SquaredEuclidean => squared_euclidean_distance(a, b),
        DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(squared_euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(euclidean_distance(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_cosine() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_distance_by_metric() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        assert!((distance(DistanceMetric::Euclidean, &a, &b) - 2f32.sqrt()).abs() < 1e-6);
        assert!((distance(DistanceMetric::SquaredEuclidean, &a, &b) - 2.0).abs() < 1e-6);
        assert!((distance(DistanceMetric::Cosine, &a, &b) - 1.0).abs() < 1e-6);
    }
}
