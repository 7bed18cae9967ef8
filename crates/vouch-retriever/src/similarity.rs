//! Cosine similarity

/// Cosine similarity between two vectors: `dot / (‖a‖·‖b‖)`.
///
/// Defined as 0.0 when either norm is zero, so degenerate embeddings rank
/// last instead of poisoning the scan with a division error. Vectors of
/// mismatched length compare over the shorter prefix; the store guarantees
/// uniform dimensions, this is only a guard.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = vec![0.3, 0.5, 0.2];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_45_degree_angle() {
        let a = vec![1.0, 0.0];
        let b = vec![0.7071, 0.7071];
        assert!((cosine(&a, &b) - 0.7071).abs() < 1e-3);
    }

    #[test]
    fn test_opposite_vectors() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        assert!((cosine(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_is_zero_not_nan() {
        let zero = vec![0.0, 0.0, 0.0];
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine(&zero, &v), 0.0);
        assert_eq!(cosine(&v, &zero), 0.0);
        assert_eq!(cosine(&zero, &zero), 0.0);
    }
}
