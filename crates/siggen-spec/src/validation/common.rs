//! Common validation utilities for numeric config fields.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a value is finite.
///
/// # Example
/// ```
/// use siggen_spec::validation::common::validate_finite;
///
/// assert!(validate_finite("after", 1e-9).is_ok());
/// assert!(validate_finite("after", f64::NAN).is_err());
/// ```
pub fn validate_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is in [0, 1] (the unit interval).
///
/// # Example
/// ```
/// use siggen_spec::validation::common::validate_unit_interval;
///
/// assert!(validate_unit_interval("duty", 0.5).is_ok());
/// assert!(validate_unit_interval("duty", 1.5).is_err());
/// ```
pub fn validate_unit_interval(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_range(name, value, 0.0, 1.0)
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use siggen_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("fs", 2e9).is_ok());
/// assert!(validate_positive("fs", 0.0).is_err());
/// assert!(validate_positive("fs", -1.0).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is non-negative (>= 0).
///
/// # Example
/// ```
/// use siggen_spec::validation::common::validate_non_negative;
///
/// assert!(validate_non_negative("trise", 0.0).is_ok());
/// assert!(validate_non_negative("trise", 5e-12).is_ok());
/// assert!(validate_non_negative("trise", -1e-12).is_err());
/// ```
pub fn validate_non_negative(name: &str, value: f64) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value < 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is within a specified range [min, max].
pub fn validate_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CommonValidationError> {
    validate_finite(name, value)?;
    if value < min || value > max {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
