//! Distance metrics for vector similarity.
//!
//! All metrics here are expressed as distances: lower means more similar.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Distance metric for nearest-neighbor calculations.
///
/// - **SquaredEuclidean**: L2 distance without the final square root.
///   Monotone in Euclidean distance, so nearest-neighbor rankings are
///   identical while sparing one sqrt per comparison.
/// - **Euclidean**: straight-line L2 distance.
/// - **Cosine**: `1 - cosine_similarity`, magnitude-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean (L2²) distance. Range: [0, ∞).
    #[default]
    SquaredEuclidean,

    /// Euclidean (L2) distance. Range: [0, ∞).
    Euclidean,

    /// Cosine distance (1 - cosine similarity). Range: [0, 2].
    Cosine,
}

impl DistanceMetric {
    /// Compute the distance between two vectors.
    ///
    /// Returns a distance where **lower means more similar**.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the vectors have equal lengths; the index
    /// validates dimensions before calling in.
    #[inline]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

        match self {
            DistanceMetric::SquaredEuclidean => squared_euclidean(a, b),
            DistanceMetric::Euclidean => squared_euclidean(a, b).sqrt(),
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
        }
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::SquaredEuclidean => "squared_euclidean",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Cosine => "cosine",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "squared_euclidean" | "l2_squared" | "sq_l2" => Ok(DistanceMetric::SquaredEuclidean),
            "euclidean" | "l2" | "euclid" => Ok(DistanceMetric::Euclidean),
            "cosine" | "cos" => Ok(DistanceMetric::Cosine),
            _ => Err(format!("Unknown distance metric: {}", s)),
        }
    }
}

// ============================================================================
// Distance Kernels
// ============================================================================

/// Compute squared Euclidean (L2²) distance between two vectors.
#[inline]
fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    let mut sum = 0.0f32;

    // Manual loop unrolling for better throughput on long embeddings
    let chunks = a.len() / 4;
    let remainder = a.len() % 4;

    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];
        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    let start = chunks * 4;
    for i in 0..remainder {
        let idx = start + i;
        let d = a[idx] - b[idx];
        sum += d * d;
    }

    sum
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 means identical direction.
#[inline]
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_euclidean_identical() {
        let a = vec![1.0, 2.0, 3.0];
        let dist = DistanceMetric::SquaredEuclidean.distance(&a, &a);
        assert!(dist.abs() < 0.0001);
    }

    #[test]
    fn test_squared_euclidean_distance() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 2.0];
        // 1 + 4 + 4 = 9
        let dist = DistanceMetric::SquaredEuclidean.distance(&a, &b);
        assert!((dist - 9.0).abs() < 0.0001);
    }

    #[test]
    fn test_euclidean_is_sqrt_of_squared() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 2.0];
        let dist = DistanceMetric::Euclidean.distance(&a, &b);
        assert!((dist - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_squared_euclidean_unroll_remainder() {
        // 5 dimensions exercises both the unrolled body and the tail
        let a = vec![1.0, 1.0, 1.0, 1.0, 1.0];
        let b = vec![0.0, 0.0, 0.0, 0.0, 0.0];
        let dist = DistanceMetric::SquaredEuclidean.distance(&a, &b);
        assert!((dist - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let dist = DistanceMetric::Cosine.distance(&a, &a);
        assert!(dist.abs() < 0.0001);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let dist = DistanceMetric::Cosine.distance(&a, &b);
        assert!((dist - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!(
            "l2".parse::<DistanceMetric>().unwrap(),
            DistanceMetric::Euclidean
        );
        assert_eq!(
            "squared_euclidean".parse::<DistanceMetric>().unwrap(),
            DistanceMetric::SquaredEuclidean
        );
        assert_eq!(
            "cosine".parse::<DistanceMetric>().unwrap(),
            DistanceMetric::Cosine
        );
        assert!("hamming".parse::<DistanceMetric>().is_err());
    }
}
