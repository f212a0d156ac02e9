//! Pretrained rating predictor
//!
//! Holds the factor matrices of a matrix-factorization model fitted
//! offline, together with the training index mapping raw user and movie
//! identifiers to factor rows. Prediction is the biased dot product
//!
//! ```text
//! r̂(u, i) = μ + b_u + b_i + q_i · p_u
//! ```
//!
//! clamped to the model's rating scale. Identifiers outside the training
//! vocabulary are unscored.

use cinematch_core::{CineMatchError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Training index: the predictor's vocabulary
///
/// Maps the raw identifiers seen during training to inner factor-row
/// indices. Immutable at serving time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainIndex {
    users: HashMap<u32, usize>,
    items: HashMap<i64, usize>,
}

impl TrainIndex {
    pub fn new(users: HashMap<u32, usize>, items: HashMap<i64, usize>) -> Self {
        Self { users, items }
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn user_index(&self, user_id: u32) -> Option<usize> {
        self.users.get(&user_id).copied()
    }

    pub fn item_index(&self, movie_id: i64) -> Option<usize> {
        self.items.get(&movie_id).copied()
    }

    pub fn knows_user(&self, user_id: u32) -> bool {
        self.users.contains_key(&user_id)
    }

    pub fn knows_item(&self, movie_id: i64) -> bool {
        self.items.contains_key(&movie_id)
    }
}

/// Factor matrices and biases of the pretrained model
#[derive(Debug, Clone)]
pub struct FactorModel {
    /// User latent factors: [num_users x latent_factors]
    pub user_factors: Array2<f32>,
    /// Item latent factors: [num_items x latent_factors]
    pub item_factors: Array2<f32>,
    /// Per-user rating bias
    pub user_biases: Array1<f32>,
    /// Per-item rating bias
    pub item_biases: Array1<f32>,
    /// Global mean rating of the training data
    pub global_mean: f32,
    /// Lower bound of the rating scale
    pub min_rating: f32,
    /// Upper bound of the rating scale
    pub max_rating: f32,
}

impl FactorModel {
    /// Raw prediction for inner indices, clamped to the rating scale
    pub fn predict_inner(&self, user_idx: usize, item_idx: usize) -> f32 {
        let dot = self
            .user_factors
            .row(user_idx)
            .dot(&self.item_factors.row(item_idx));
        let estimate = self.global_mean + self.user_biases[user_idx] + self.item_biases[item_idx] + dot;
        estimate.clamp(self.min_rating, self.max_rating)
    }

    pub fn latent_factors(&self) -> usize {
        self.user_factors.ncols()
    }
}

/// Rating predictor: factor model plus its training index
///
/// Construction validates that the factor matrices line up with the
/// vocabulary, so a mismatched artifact pair is rejected at load.
#[derive(Debug)]
pub struct RatingPredictor {
    model: FactorModel,
    index: TrainIndex,
}

impl RatingPredictor {
    pub fn new(model: FactorModel, index: TrainIndex) -> Result<Self> {
        if model.user_factors.nrows() != index.num_users() {
            return Err(CineMatchError::internal(format!(
                "user factor rows ({}) do not match training vocabulary ({} users)",
                model.user_factors.nrows(),
                index.num_users()
            )));
        }
        if model.item_factors.nrows() != index.num_items() {
            return Err(CineMatchError::internal(format!(
                "item factor rows ({}) do not match training vocabulary ({} items)",
                model.item_factors.nrows(),
                index.num_items()
            )));
        }
        if model.user_biases.len() != model.user_factors.nrows()
            || model.item_biases.len() != model.item_factors.nrows()
        {
            return Err(CineMatchError::internal(
                "bias vector length does not match factor rows",
            ));
        }
        if model.user_factors.ncols() != model.item_factors.ncols() {
            return Err(CineMatchError::internal(
                "user and item factors have different latent dimensions",
            ));
        }
        if model.min_rating >= model.max_rating {
            return Err(CineMatchError::internal("invalid rating scale bounds"));
        }

        Ok(Self { model, index })
    }

    pub fn knows_user(&self, user_id: u32) -> bool {
        self.index.knows_user(user_id)
    }

    pub fn knows_item(&self, movie_id: i64) -> bool {
        self.index.knows_item(movie_id)
    }

    /// Predicted rating, or `None` when either id is outside the
    /// training vocabulary
    pub fn predict(&self, user_id: u32, movie_id: i64) -> Option<f32> {
        let user_idx = self.index.user_index(user_id)?;
        let item_idx = self.index.item_index(movie_id)?;
        Some(self.model.predict_inner(user_idx, item_idx))
    }

    pub fn rating_scale(&self) -> (f32, f32) {
        (self.model.min_rating, self.model.max_rating)
    }

    pub fn model(&self) -> &FactorModel {
        &self.model
    }

    pub fn index(&self) -> &TrainIndex {
        &self.index
    }
}
