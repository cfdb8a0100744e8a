//! Field validators returning `ValidationError` naming the offending field.

use crate::server::error::validation::ValidationError;

/// Largest accepted batch create request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Trims `value` and rejects it when empty.
pub fn non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Like `non_empty` but also caps the length in characters.
pub fn bounded_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = non_empty(field, value)?;
    if trimmed.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(trimmed)
}

/// Inclusive range check.
pub fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

/// `in_range` applied only when a value is present.
pub fn opt_in_range(
    field: &str,
    value: Option<f64>,
    min: f64,
    max: f64,
) -> Result<Option<f64>, ValidationError> {
    value.map(|v| in_range(field, v, min, max)).transpose()
}

pub fn opt_non_negative(field: &str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(ValidationError::new(field, "must not be negative"))
        }
        other => Ok(other),
    }
}

/// Compass heading in degrees, `0 <= heading < 360`.
pub fn opt_heading(field: &str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..360.0).contains(&v) => Err(ValidationError::new(
            field,
            "must be at least 0 and less than 360",
        )),
        other => Ok(other),
    }
}

/// Percentage in `0..=100`.
pub fn opt_percentage(field: &str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    opt_in_range(field, value, 0.0, 100.0)
}

/// Rejects ids that are zero or negative.
pub fn positive_id(field: &str, value: i32) -> Result<i32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(field, "must be a positive integer"));
    }
    Ok(value)
}

/// Batch requests must contain 1 through `MAX_BATCH_SIZE` items.
pub fn batch_size(len: usize) -> Result<(), ValidationError> {
    if len == 0 {
        return Err(ValidationError::new("items", "must contain at least one item"));
    }
    if len > MAX_BATCH_SIZE {
        return Err(ValidationError::new(
            "items",
            format!("must contain at most {} items", MAX_BATCH_SIZE),
        ));
    }
    Ok(())
}
