//! Configuration loader module for CineMatch services
//!
//! Provides a unified configuration loading system with environment variable
//! parsing, validation, and support for .env files. All configuration uses
//! the `CINEMATCH_` prefix for environment variables.
//!
//! Override hierarchy: defaults < .env < environment.
//!
//! # Example
//!
//! ```no_run
//! use cinematch_core::config::{load_dotenv, ArtifactConfig, ConfigLoader, ServiceConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! load_dotenv();
//!
//! let artifacts = ArtifactConfig::from_env()?;
//! let service = ServiceConfig::from_env()?;
//!
//! artifacts.validate()?;
//! service.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::CineMatchError;
use std::path::{Path, PathBuf};

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration
/// from environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if a value cannot be parsed.
    fn from_env() -> Result<Self, CineMatchError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if any validation check fails.
    fn validate(&self) -> Result<(), CineMatchError>;
}

/// Serving artifact locations
///
/// All artifacts are produced by the offline training pipeline and read
/// once at startup.
///
/// # Environment Variables
///
/// - `CINEMATCH_ARTIFACTS_DIR` (optional): artifact directory (default: "./artifacts")
/// - `CINEMATCH_ARTIFACTS_MOVIES` (optional): catalog file name (default: "movies.csv")
/// - `CINEMATCH_ARTIFACTS_SIMILARITY` (optional): similarity matrix file name (default: "similarity.bin")
/// - `CINEMATCH_ARTIFACTS_FACTORS` (optional): factor model file name (default: "factors.bin")
/// - `CINEMATCH_ARTIFACTS_TRAIN_INDEX` (optional): training index file name (default: "train_index.bin")
/// - `CINEMATCH_ARTIFACTS_RATINGS` (optional): ratings reference file name (default: "ratings.csv")
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    /// Directory holding all serving artifacts
    pub dir: PathBuf,
    /// Catalog table file name
    pub movies_file: String,
    /// Item-item similarity matrix file name
    pub similarity_file: String,
    /// Pretrained factor model file name
    pub factors_file: String,
    /// Training index (predictor vocabulary) file name
    pub train_index_file: String,
    /// Ratings reference file name (user id range)
    pub ratings_file: String,
}

impl ArtifactConfig {
    pub fn movies_path(&self) -> PathBuf {
        self.dir.join(&self.movies_file)
    }

    pub fn similarity_path(&self) -> PathBuf {
        self.dir.join(&self.similarity_file)
    }

    pub fn factors_path(&self) -> PathBuf {
        self.dir.join(&self.factors_file)
    }

    pub fn train_index_path(&self) -> PathBuf {
        self.dir.join(&self.train_index_file)
    }

    pub fn ratings_path(&self) -> PathBuf {
        self.dir.join(&self.ratings_file)
    }

    /// Config rooted at an explicit directory, default file names
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./artifacts"),
            movies_file: "movies.csv".to_string(),
            similarity_file: "similarity.bin".to_string(),
            factors_file: "factors.bin".to_string(),
            train_index_file: "train_index.bin".to_string(),
            ratings_file: "ratings.csv".to_string(),
        }
    }
}

impl ConfigLoader for ArtifactConfig {
    fn from_env() -> Result<Self, CineMatchError> {
        let defaults = ArtifactConfig::default();

        let dir = std::env::var("CINEMATCH_ARTIFACTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.dir);

        let movies_file =
            std::env::var("CINEMATCH_ARTIFACTS_MOVIES").unwrap_or(defaults.movies_file);
        let similarity_file =
            std::env::var("CINEMATCH_ARTIFACTS_SIMILARITY").unwrap_or(defaults.similarity_file);
        let factors_file =
            std::env::var("CINEMATCH_ARTIFACTS_FACTORS").unwrap_or(defaults.factors_file);
        let train_index_file =
            std::env::var("CINEMATCH_ARTIFACTS_TRAIN_INDEX").unwrap_or(defaults.train_index_file);
        let ratings_file =
            std::env::var("CINEMATCH_ARTIFACTS_RATINGS").unwrap_or(defaults.ratings_file);

        Ok(Self {
            dir,
            movies_file,
            similarity_file,
            factors_file,
            train_index_file,
            ratings_file,
        })
    }

    fn validate(&self) -> Result<(), CineMatchError> {
        if self.dir.as_os_str().is_empty() {
            return Err(CineMatchError::Configuration {
                message: "artifacts dir must not be empty".to_string(),
                key: Some("CINEMATCH_ARTIFACTS_DIR".to_string()),
            });
        }

        for (name, key) in [
            (&self.movies_file, "CINEMATCH_ARTIFACTS_MOVIES"),
            (&self.similarity_file, "CINEMATCH_ARTIFACTS_SIMILARITY"),
            (&self.factors_file, "CINEMATCH_ARTIFACTS_FACTORS"),
            (&self.train_index_file, "CINEMATCH_ARTIFACTS_TRAIN_INDEX"),
            (&self.ratings_file, "CINEMATCH_ARTIFACTS_RATINGS"),
        ] {
            if name.is_empty() {
                return Err(CineMatchError::Configuration {
                    message: "artifact file name must not be empty".to_string(),
                    key: Some(key.to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Service configuration
///
/// HTTP service settings: host, port, workers, and logging.
///
/// # Environment Variables
///
/// - `CINEMATCH_SERVICE_HOST` (optional): bind host (default: "0.0.0.0")
/// - `CINEMATCH_SERVICE_PORT` (optional): bind port (default: 8083)
/// - `CINEMATCH_SERVICE_WORKERS` (optional): worker threads (default: CPU count)
/// - `CINEMATCH_SERVICE_LOG_LEVEL` (optional): log level (default: "info")
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service bind host
    pub host: String,
    /// Service bind port
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8083,
            workers: num_cpus::get(),
            log_level: "info".to_string(),
        }
    }
}

impl ConfigLoader for ServiceConfig {
    fn from_env() -> Result<Self, CineMatchError> {
        let host = std::env::var("CINEMATCH_SERVICE_HOST")
            .or_else(|_| std::env::var("HOST"))
            .unwrap_or_else(|_| ServiceConfig::default().host);

        let port = parse_env_var("CINEMATCH_SERVICE_PORT", ServiceConfig::default().port)
            .or_else(|_| parse_env_var("PORT", ServiceConfig::default().port))?;

        let workers = parse_env_var(
            "CINEMATCH_SERVICE_WORKERS",
            ServiceConfig::default().workers,
        )?;

        let log_level = std::env::var("CINEMATCH_SERVICE_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| ServiceConfig::default().log_level);

        Ok(Self {
            host,
            port,
            workers,
            log_level,
        })
    }

    fn validate(&self) -> Result<(), CineMatchError> {
        if self.port == 0 {
            return Err(CineMatchError::Configuration {
                message: "port must be greater than 0".to_string(),
                key: Some("CINEMATCH_SERVICE_PORT".to_string()),
            });
        }

        if self.workers == 0 {
            return Err(CineMatchError::Configuration {
                message: "workers must be greater than 0".to_string(),
                key: Some("CINEMATCH_SERVICE_WORKERS".to_string()),
            });
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(CineMatchError::Configuration {
                message: format!(
                    "Invalid log_level '{}'. Must be one of: {}",
                    self.log_level,
                    valid_log_levels.join(", ")
                ),
                key: Some("CINEMATCH_SERVICE_LOG_LEVEL".to_string()),
            });
        }

        Ok(())
    }
}

/// Parse an environment variable with a default value
///
/// # Errors
///
/// Returns a `Configuration` error if the value is set but cannot be parsed.
fn parse_env_var<T>(key: &str, default: T) -> Result<T, CineMatchError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>().map_err(|e| CineMatchError::Configuration {
                message: format!("Failed to parse {}: {}", key, e),
                key: Some(key.to_string()),
            })
        })
        .unwrap_or(Ok(default))
}

/// Load .env file if present
///
/// Does not return an error if the .env file is not found.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}
