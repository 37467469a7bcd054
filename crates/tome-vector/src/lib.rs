//! # tome-vector
//!
//! A flat, in-memory vector index with exact nearest-neighbor search.
//!
//! The index is built once from an ordered sequence of equal-dimension
//! vectors and then serves repeated queries. The position of a vector in
//! the input sequence is its identity: search results report 0-based
//! insertion positions that stay valid for the lifetime of the index.
//!
//! ## Quick Start
//!
//! ```rust
//! use tome_vector::FlatIndex;
//!
//! let index = FlatIndex::build(vec![
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//! ])?;
//!
//! let neighbors = index.search(&[0.9, 0.1], 1)?;
//! assert_eq!(neighbors[0].position, 0);
//! # Ok::<(), tome_vector::Error>(())
//! ```
//!
//! Exact brute-force search is the right trade-off here: corpora are
//! rebuilt wholesale per ingestion and stay small enough that a linear
//! scan beats the constant factors of an approximate graph index, while
//! keeping positions stable and results deterministic.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;

pub use distance::DistanceMetric;
pub use error::{Error, Result};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A nearest-neighbor search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// 0-based insertion position of the matched vector.
    pub position: usize,
    /// Distance to the query (lower is more similar).
    pub distance: f32,
}

/// Flat exact nearest-neighbor index.
///
/// Immutable after [`FlatIndex::build`]; shareable across threads.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    vectors: Vec<Vec<f32>>,
    dimensions: usize,
    metric: DistanceMetric,
}

impl FlatIndex {
    /// Build an index over the given vectors with the default metric
    /// (squared Euclidean).
    ///
    /// All vectors must share one dimensionality, taken from the first
    /// vector. An empty input yields a valid index whose searches return
    /// no results.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if any vector disagrees with
    /// the first one's length, or [`Error::InvalidVector`] for vectors
    /// containing NaN or infinity.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        Self::build_with_metric(vectors, DistanceMetric::default())
    }

    /// Build an index with an explicit distance metric.
    pub fn build_with_metric(vectors: Vec<Vec<f32>>, metric: DistanceMetric) -> Result<Self> {
        let dimensions = vectors.first().map(Vec::len).unwrap_or(0);

        for (position, vector) in vectors.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|v| v.is_nan() || v.is_infinite()) {
                return Err(Error::InvalidVector(format!(
                    "vector at position {} contains NaN or Inf",
                    position
                )));
            }
        }

        debug!(count = vectors.len(), dimensions, %metric, "Built flat index");

        Ok(Self {
            vectors,
            dimensions,
            metric,
        })
    }

    /// Dimensionality of the indexed vectors (0 for an empty index).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The distance metric in use.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Find up to `k` nearest neighbors of `query`, ascending by distance.
    ///
    /// Ties are broken by insertion order (stable sort), so results are
    /// deterministic. Querying an empty index returns an empty vector,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the query's length differs
    /// from the indexed dimensionality.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| Neighbor {
                position,
                distance: self.metric.distance(query, vector),
            })
            .collect();

        // Stable sort keeps insertion order among equal distances
        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        neighbors.truncate(k);

        debug!(k, returned = neighbors.len(), "Search completed");
        Ok(neighbors)
    }
}
