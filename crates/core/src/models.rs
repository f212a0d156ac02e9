//! Domain models for the CineMatch platform
//!
//! Core data structures for catalog entries and recommendation results,
//! shared between the engine and its HTTP surface. All of these are
//! immutable at serving time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single catalog entry
///
/// The catalog is the fixed list of known movies, loaded once at startup.
/// `movie_id` is the identifier the rating predictor was trained on; the
/// entry's position in the catalog is the index into the similarity matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieEntry {
    /// Stable movie identifier (matches the training data)
    #[serde(rename = "movieId")]
    pub movie_id: i64,

    /// Display title, e.g. "Toy Story (1995)"
    pub title: String,

    /// Pipe-separated genre labels, e.g. "Animation|Comedy"
    #[serde(default)]
    pub genres: Option<String>,
}

/// A recommended title with its predicted rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedTitle {
    pub title: String,
    /// Predicted rating on the model's rating scale
    pub predicted_rating: f32,
}

/// Ranked recommendation list for one (user, seed movie) request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub user_id: u32,

    /// The catalog title the query resolved to
    pub seed_title: String,

    /// Ordered by predicted rating descending, length <= requested count
    pub recommendations: Vec<RatedTitle>,

    /// Candidates dropped because they are outside the predictor's
    /// training vocabulary
    pub skipped_unscored: usize,

    pub generated_at: DateTime<Utc>,
}

/// A similar title with its content-similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTitle {
    pub title: String,
    pub similarity: f32,
}

/// Content-based neighbors of a resolved seed title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarTitles {
    pub seed_title: String,
    /// Ordered by similarity descending
    pub titles: Vec<SimilarTitle>,
}
