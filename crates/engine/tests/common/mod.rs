//! Shared fixtures for integration tests
//!
//! Writes a full set of serving artifacts into a directory, mimicking the
//! offline training pipeline's output.

use cinematch_core::{ArtifactConfig, MovieEntry};
use cinematch_engine::artifacts::{save_factor_model, save_similarity, save_train_index};
use cinematch_engine::{FactorModel, SimilarityMatrix, TrainIndex};
use ndarray::array;
use std::collections::HashMap;
use std::path::Path;

fn entry(movie_id: i64, title: &str) -> MovieEntry {
    MovieEntry {
        movie_id,
        title: title.to_string(),
        genres: Some("Comedy".to_string()),
    }
}

pub fn fixture_catalog_entries() -> Vec<MovieEntry> {
    vec![
        entry(1, "Toy Story (1995)"),
        entry(2, "Jumanji (1995)"),
        entry(3, "Grumpier Old Men (1995)"),
        entry(6, "Heat (1995)"),
        entry(16, "Casino (1995)"),
        entry(17, "Sense and Sensibility (1995)"),
    ]
}

pub fn fixture_similarity() -> SimilarityMatrix {
    SimilarityMatrix::new(array![
        [1.0, 0.9, 0.6, 0.2, 0.1, 0.3],
        [0.9, 1.0, 0.5, 0.3, 0.2, 0.4],
        [0.6, 0.5, 1.0, 0.3, 0.2, 0.7],
        [0.2, 0.3, 0.3, 1.0, 0.9, 0.1],
        [0.1, 0.2, 0.2, 0.9, 1.0, 0.2],
        [0.3, 0.4, 0.7, 0.1, 0.2, 1.0],
    ])
    .unwrap()
}

pub fn fixture_factor_model() -> FactorModel {
    // Dyadic weights keep predictions exact in f32
    FactorModel {
        user_factors: array![[1.0, 0.0], [0.0, 1.0]],
        item_factors: array![
            [0.5, 0.125],
            [0.375, 0.25],
            [0.125, 0.25],
            [0.25, 0.5],
            [0.125, 0.625],
        ],
        user_biases: array![0.25, -0.125],
        item_biases: array![0.125, 0.0, -0.125, 0.25, 0.375],
        global_mean: 3.5,
        min_rating: 0.5,
        max_rating: 5.0,
    }
}

pub fn fixture_train_index() -> TrainIndex {
    TrainIndex::new(
        HashMap::from([(1u32, 0usize), (2, 1)]),
        HashMap::from([(1i64, 0usize), (2, 1), (3, 2), (6, 3), (16, 4)]),
    )
}

/// Write the full artifact set into `dir`, returning the matching config
pub fn write_fixture_artifacts(dir: &Path) -> ArtifactConfig {
    let config = ArtifactConfig::with_dir(dir);

    let mut writer = csv::Writer::from_path(config.movies_path()).unwrap();
    for movie in fixture_catalog_entries() {
        writer.serialize(movie).unwrap();
    }
    writer.flush().unwrap();

    save_similarity(&fixture_similarity(), &config.similarity_path()).unwrap();
    save_factor_model(&fixture_factor_model(), &config.factors_path()).unwrap();
    save_train_index(&fixture_train_index(), &config.train_index_path()).unwrap();

    // Users 1..=5 appear in the ratings reference; only 1 and 2 were
    // trained on
    std::fs::write(
        config.ratings_path(),
        "userId,movieId,rating,timestamp\n\
         1,1,4.0,964982703\n\
         1,6,4.5,964982931\n\
         2,2,3.0,964983815\n\
         3,3,2.5,964984086\n\
         4,16,5.0,964984789\n\
         5,17,3.5,964985103\n",
    )
    .unwrap();

    config
}
