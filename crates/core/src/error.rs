//! Error types for CineMatch services
//!
//! Recoverable lookup failures (unknown title, unknown user) are distinct
//! variants carrying enough context for a useful response body, rather than
//! a stringified catch-all.

use std::path::PathBuf;

/// Common error type for the CineMatch platform
#[derive(Debug, thiserror::Error)]
pub enum CineMatchError {
    /// A serving artifact is missing or undecodable. Fatal at startup.
    #[error("Artifact error: {message}")]
    Artifact {
        message: String,
        path: Option<PathBuf>,
    },

    /// The requested title did not resolve against the catalog.
    #[error("Title not found: '{query}'")]
    TitleNotFound {
        query: String,
        /// Up to three near matches at the relaxed cutoff, best first.
        suggestions: Vec<String>,
    },

    /// The user id is not in the predictor's training vocabulary.
    #[error("User {user_id} not found")]
    UserNotFound { user_id: u32 },

    /// Request input failed validation.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        key: Option<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CineMatchError {
    /// Artifact error referencing the offending file
    pub fn artifact(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Artifact {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Validation error tagged with the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error is a client-recoverable lookup or input failure
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TitleNotFound { .. } | Self::UserNotFound { .. } | Self::Validation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_not_found_display() {
        let err = CineMatchError::TitleNotFound {
            query: "Toy Stori".to_string(),
            suggestions: vec!["Toy Story".to_string()],
        };
        assert_eq!(err.to_string(), "Title not found: 'Toy Stori'");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_artifact_error_is_not_recoverable() {
        let err = CineMatchError::artifact("missing file", "/tmp/similarity.bin");
        assert!(!err.is_recoverable());
        match err {
            CineMatchError::Artifact { path, .. } => {
                assert_eq!(path.unwrap(), PathBuf::from("/tmp/similarity.bin"));
            }
            _ => panic!("Expected Artifact error"),
        }
    }

    #[test]
    fn test_validation_field_helper() {
        let err = CineMatchError::validation_field("must be positive", "user_id");
        match err {
            CineMatchError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("user_id"));
            }
            _ => panic!("Expected Validation error"),
        }
    }
}
