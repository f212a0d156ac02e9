//! Final ranking of scored candidates
//!
//! Sorts by predicted rating descending and truncates to the requested
//! count. `sort_by` is stable, so candidates with equal predicted ratings
//! keep their candidate-window order (most similar first).

use cinematch_core::RatedTitle;

/// Rank scored titles by predicted rating descending, truncated to `count`
pub fn rank_by_rating(mut scored: Vec<RatedTitle>, count: usize) -> Vec<RatedTitle> {
    scored.sort_by(|a, b| b.predicted_rating.partial_cmp(&a.predicted_rating).unwrap());
    scored.truncate(count);
    scored
}
