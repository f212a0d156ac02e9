//! Similarity-based candidate generation
//!
//! Wraps the precomputed item-item similarity matrix and produces the
//! candidate window for a seed movie: all catalog positions ranked by
//! similarity descending, seed excluded, truncated to the window size.

use cinematch_core::{CineMatchError, Result};
use ndarray::Array2;

/// Extra candidates fetched beyond the requested count, so the ranker
/// still has enough scorable entries after vocabulary misses
pub const CANDIDATE_PADDING: usize = 10;

/// A candidate catalog entry with its similarity to the seed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Catalog position
    pub index: usize,
    /// Content similarity to the seed movie
    pub score: f32,
}

/// Precomputed item-item similarity matrix
///
/// Square, indexed by catalog position, symmetric by construction of the
/// offline pipeline. Immutable at serving time.
#[derive(Debug)]
pub struct SimilarityMatrix {
    matrix: Array2<f32>,
}

impl SimilarityMatrix {
    /// Wrap a matrix, rejecting non-square input
    pub fn new(matrix: Array2<f32>) -> Result<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(CineMatchError::internal(format!(
                "similarity matrix must be square, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        Ok(Self { matrix })
    }

    /// Number of catalog entries the matrix covers
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    pub fn score(&self, i: usize, j: usize) -> f32 {
        self.matrix[[i, j]]
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.matrix
    }

    /// Candidate window for a seed: the `window` most similar entries,
    /// similarity descending, seed excluded
    pub fn neighbors(&self, seed_index: usize, window: usize) -> Vec<Candidate> {
        let row = self.matrix.row(seed_index);

        let mut candidates: Vec<Candidate> = row
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != seed_index)
            .map(|(index, &score)| Candidate { index, score })
            .collect();

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        candidates.truncate(window);
        candidates
    }
}
