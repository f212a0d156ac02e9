//! # CineMatch Recommendation Engine
//!
//! Hybrid movie recommendations over precomputed serving artifacts:
//! content-based candidate generation from an item-item similarity matrix,
//! combined with rating prediction from a pretrained matrix-factorization
//! model.
//!
//! ## Modules
//!
//! - `artifacts`: artifact loading, persistence, and the serving context
//! - `resolver`: fuzzy title resolution against the catalog
//! - `candidates`: similarity-based candidate windows
//! - `predictor`: the pretrained rating predictor and its vocabulary
//! - `ranker`: final ordering of scored candidates
//! - `recommend`: the hybrid pipeline tying the above together
//! - `server`: the actix-web HTTP surface

pub mod artifacts;
pub mod candidates;
pub mod predictor;
pub mod ranker;
pub mod recommend;
pub mod resolver;
pub mod server;

// Re-export key types
pub use artifacts::{Catalog, RecommenderContext};
pub use candidates::{Candidate, SimilarityMatrix, CANDIDATE_PADDING};
pub use predictor::{FactorModel, RatingPredictor, TrainIndex};
pub use ranker::rank_by_rating;
pub use recommend::HybridRecommender;
pub use resolver::{TitleMatch, TitleResolver, MATCH_CUTOFF, MAX_SUGGESTIONS, SUGGESTION_CUTOFF};
pub use server::AppState;

#[cfg(test)]
mod tests;
