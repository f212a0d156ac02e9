//! Serving artifact loading and persistence
//!
//! All artifacts are produced by the offline training pipeline:
//!
//! - `movies.csv` — the catalog table (MovieLens layout)
//! - `similarity.bin` — bincode item-item similarity matrix
//! - `factors.bin` — bincode factor model (shapes + flat weight data)
//! - `train_index.bin` — bincode training vocabulary
//! - `ratings.csv` — ratings reference, scanned for the maximum user id
//!
//! A missing or undecodable artifact is a fatal startup error naming the
//! offending path. After loading, the similarity matrix dimension must
//! equal the catalog length; the factor matrices must line up with the
//! training index. Everything here is read-only after startup.

use crate::candidates::SimilarityMatrix;
use crate::predictor::{FactorModel, RatingPredictor, TrainIndex};
use cinematch_core::{ArtifactConfig, CineMatchError, MovieEntry, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// The movie catalog, loaded once at startup
///
/// Position in the catalog is the index into the similarity matrix;
/// `movie_id` is the identifier the predictor was trained on.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<MovieEntry>,
    position_by_id: HashMap<i64, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<MovieEntry>) -> Result<Self> {
        let mut position_by_id = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if position_by_id.insert(entry.movie_id, position).is_some() {
                return Err(CineMatchError::internal(format!(
                    "duplicate movie id {} in catalog",
                    entry.movie_id
                )));
            }
        }
        Ok(Self {
            entries,
            position_by_id,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, position: usize) -> &MovieEntry {
        &self.entries[position]
    }

    pub fn entries(&self) -> &[MovieEntry] {
        &self.entries
    }

    pub fn position_of(&self, movie_id: i64) -> Option<usize> {
        self.position_by_id.get(&movie_id).copied()
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }
}

/// Serializable mirror of [`SimilarityMatrix`]
#[derive(Serialize, Deserialize)]
struct SerializableSimilarity {
    dim: usize,
    /// Row-major matrix data, `dim * dim` entries
    data: Vec<f32>,
}

/// Serializable mirror of [`FactorModel`]
#[derive(Serialize, Deserialize)]
struct SerializableFactorModel {
    user_factors_shape: (usize, usize),
    user_factors_data: Vec<f32>,
    item_factors_shape: (usize, usize),
    item_factors_data: Vec<f32>,
    user_biases: Vec<f32>,
    item_biases: Vec<f32>,
    global_mean: f32,
    min_rating: f32,
    max_rating: f32,
}

/// One row of the ratings reference file (MovieLens layout)
#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(rename = "userId")]
    user_id: u32,
    #[serde(rename = "movieId")]
    #[allow(dead_code)]
    movie_id: i64,
    #[allow(dead_code)]
    rating: f32,
}

fn artifact_err(path: &Path, err: impl std::fmt::Display) -> CineMatchError {
    CineMatchError::artifact(err.to_string(), path)
}

/// Load the catalog table from CSV
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| artifact_err(path, e))?;

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let entry: MovieEntry = record.map_err(|e| artifact_err(path, e))?;
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(CineMatchError::artifact("catalog is empty", path));
    }

    Catalog::new(entries)
}

/// Load the similarity matrix artifact
pub fn load_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let file = File::open(path).map_err(|e| artifact_err(path, e))?;
    let raw: SerializableSimilarity =
        bincode::deserialize_from(BufReader::new(file)).map_err(|e| artifact_err(path, e))?;

    let matrix = Array2::from_shape_vec((raw.dim, raw.dim), raw.data)
        .map_err(|e| artifact_err(path, e))?;
    SimilarityMatrix::new(matrix)
}

/// Persist the similarity matrix artifact
pub fn save_similarity(matrix: &SimilarityMatrix, path: &Path) -> Result<()> {
    let raw = SerializableSimilarity {
        dim: matrix.len(),
        data: matrix.as_array().iter().copied().collect(),
    };
    let file = File::create(path).map_err(|e| artifact_err(path, e))?;
    bincode::serialize_into(BufWriter::new(file), &raw).map_err(|e| artifact_err(path, e))
}

/// Load the pretrained factor model artifact
pub fn load_factor_model(path: &Path) -> Result<FactorModel> {
    let file = File::open(path).map_err(|e| artifact_err(path, e))?;
    let raw: SerializableFactorModel =
        bincode::deserialize_from(BufReader::new(file)).map_err(|e| artifact_err(path, e))?;

    let user_factors = Array2::from_shape_vec(raw.user_factors_shape, raw.user_factors_data)
        .map_err(|e| artifact_err(path, e))?;
    let item_factors = Array2::from_shape_vec(raw.item_factors_shape, raw.item_factors_data)
        .map_err(|e| artifact_err(path, e))?;

    Ok(FactorModel {
        user_factors,
        item_factors,
        user_biases: Array1::from_vec(raw.user_biases),
        item_biases: Array1::from_vec(raw.item_biases),
        global_mean: raw.global_mean,
        min_rating: raw.min_rating,
        max_rating: raw.max_rating,
    })
}

/// Persist the factor model artifact
pub fn save_factor_model(model: &FactorModel, path: &Path) -> Result<()> {
    let raw = SerializableFactorModel {
        user_factors_shape: (model.user_factors.nrows(), model.user_factors.ncols()),
        user_factors_data: model.user_factors.iter().copied().collect(),
        item_factors_shape: (model.item_factors.nrows(), model.item_factors.ncols()),
        item_factors_data: model.item_factors.iter().copied().collect(),
        user_biases: model.user_biases.to_vec(),
        item_biases: model.item_biases.to_vec(),
        global_mean: model.global_mean,
        min_rating: model.min_rating,
        max_rating: model.max_rating,
    };
    let file = File::create(path).map_err(|e| artifact_err(path, e))?;
    bincode::serialize_into(BufWriter::new(file), &raw).map_err(|e| artifact_err(path, e))
}

/// Load the training index artifact
pub fn load_train_index(path: &Path) -> Result<TrainIndex> {
    let file = File::open(path).map_err(|e| artifact_err(path, e))?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|e| artifact_err(path, e))
}

/// Persist the training index artifact
pub fn save_train_index(index: &TrainIndex, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| artifact_err(path, e))?;
    bincode::serialize_into(BufWriter::new(file), index).map_err(|e| artifact_err(path, e))
}

/// Scan the ratings reference file for the maximum observed user id
pub fn load_max_user_id(path: &Path) -> Result<u32> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| artifact_err(path, e))?;

    let mut max_user_id = 0u32;
    for record in reader.deserialize() {
        let rating: RatingRecord = record.map_err(|e| artifact_err(path, e))?;
        max_user_id = max_user_id.max(rating.user_id);
    }

    if max_user_id == 0 {
        return Err(CineMatchError::artifact("ratings file has no rows", path));
    }

    Ok(max_user_id)
}

/// Read-only serving state, loaded once at startup and never mutated
///
/// Every recommendation request runs against this context; there is no
/// shared mutable state and no locking.
#[derive(Debug)]
pub struct RecommenderContext {
    pub catalog: Catalog,
    pub similarity: SimilarityMatrix,
    pub predictor: RatingPredictor,
    /// Maximum user id observed in the ratings reference file; bounds
    /// user-id input validation
    pub max_user_id: u32,
}

impl RecommenderContext {
    /// Load and validate all serving artifacts
    ///
    /// Fails fast on the first missing or inconsistent artifact.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let catalog = load_catalog(&config.movies_path())?;
        info!(entries = catalog.len(), "Loaded movie catalog");

        let similarity = load_similarity(&config.similarity_path())?;
        info!(dim = similarity.len(), "Loaded similarity matrix");

        let model = load_factor_model(&config.factors_path())?;
        let index = load_train_index(&config.train_index_path())?;
        info!(
            users = index.num_users(),
            items = index.num_items(),
            latent_factors = model.latent_factors(),
            "Loaded factor model and training index"
        );

        let max_user_id = load_max_user_id(&config.ratings_path())?;
        info!(max_user_id, "Loaded ratings reference");

        Self::assemble(catalog, similarity, model, index, max_user_id)
    }

    /// Assemble a context from already-loaded parts, enforcing alignment
    pub fn assemble(
        catalog: Catalog,
        similarity: SimilarityMatrix,
        model: FactorModel,
        index: TrainIndex,
        max_user_id: u32,
    ) -> Result<Self> {
        if similarity.len() != catalog.len() {
            return Err(CineMatchError::Artifact {
                message: format!(
                    "similarity matrix dimension ({}) does not match catalog length ({})",
                    similarity.len(),
                    catalog.len()
                ),
                path: None,
            });
        }

        let predictor = RatingPredictor::new(model, index)?;

        Ok(Self {
            catalog,
            similarity,
            predictor,
            max_user_id,
        })
    }
}
