//! Validation utilities for CineMatch request inputs
//!
//! All helpers return the shared error type with the offending field name.

use crate::error::CineMatchError;

/// Maximum recommendation count a single request may ask for
pub const MAX_COUNT: usize = 50;

/// Default recommendation count when the request omits it
pub const DEFAULT_COUNT: usize = 5;

/// Maximum accepted title query length
pub const MAX_TITLE_LEN: usize = 512;

/// Validate a user identifier against the observed id range
///
/// User ids are 1-based; `max_user_id` is the maximum id observed in the
/// ratings reference file.
pub fn validate_user_id(user_id: u32, max_user_id: u32) -> Result<(), CineMatchError> {
    if user_id == 0 {
        return Err(CineMatchError::validation_field(
            "user_id must be at least 1",
            "user_id",
        ));
    }
    if user_id > max_user_id {
        return Err(CineMatchError::validation_field(
            format!("user_id must be at most {}", max_user_id),
            "user_id",
        ));
    }
    Ok(())
}

/// Validate a requested recommendation count, applying the default
pub fn validate_count(count: Option<usize>) -> Result<usize, CineMatchError> {
    let count = count.unwrap_or(DEFAULT_COUNT);
    if count == 0 {
        return Err(CineMatchError::validation_field(
            "count must be at least 1",
            "count",
        ));
    }
    if count > MAX_COUNT {
        return Err(CineMatchError::validation_field(
            format!("count must be at most {}", MAX_COUNT),
            "count",
        ));
    }
    Ok(count)
}

/// Validate a free-text title query
pub fn validate_title(title: &str) -> Result<(), CineMatchError> {
    if title.trim().is_empty() {
        return Err(CineMatchError::validation_field(
            "title must not be empty",
            "title",
        ));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CineMatchError::validation_field(
            format!("title must be at most {} characters", MAX_TITLE_LEN),
            "title",
        ));
    }
    Ok(())
}
