//! # CineMatch Core
//!
//! Shared types for the CineMatch hybrid movie recommender.
//!
//! This crate provides the building blocks used by the recommendation
//! engine and its HTTP surface:
//!
//! - `error`: the error taxonomy and shared `Result` alias
//! - `config`: environment-based configuration loading and validation
//! - `models`: domain models for catalog entries and recommendation results
//! - `validation`: input validation helpers

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{load_dotenv, ArtifactConfig, ConfigLoader, ServiceConfig};
pub use error::CineMatchError;
pub use models::{
    MovieEntry, RatedTitle, RecommendationSet, SimilarTitle, SimilarTitles,
};
pub use validation::{validate_count, validate_title, validate_user_id};

/// Result type alias for CineMatch operations
pub type Result<T> = std::result::Result<T, CineMatchError>;
