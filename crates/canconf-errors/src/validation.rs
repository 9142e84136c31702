//! Input validation error types.
//!
//! Range checks and constraint violations raised while building profiles,
//! bus addresses, manifests and vision settings.

use core::fmt;

use crate::severity::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value is required but missing
    #[error("Required field '{0}' is missing")]
    Required(String),

    /// Invalid enum value
    #[error("Invalid value '{value}' for field '{field}', expected one of: {expected}")]
    InvalidEnumValue {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Expected values
        expected: String,
    },

    /// Value must be a finite number
    #[error("Field '{0}' must be a finite number")]
    NotFinite(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }
    }

    /// Create a required field error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required(field.into())
    }

    /// Create an invalid enum value error.
    pub fn invalid_enum(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidEnumValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a not-finite error.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite(field.into())
    }

    /// Create a constraint violation error.
    pub fn constraint(msg: impl Into<String>) -> Self {
        ValidationError::ConstraintViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_out_of_range() {
        let err = ValidationError::out_of_range("can id", 70_u8, 0_u8, 62_u8);
        let msg = err.to_string();
        assert!(msg.contains("can id"));
        assert!(msg.contains("70"));
        assert!(msg.contains("62"));
    }

    #[test]
    fn test_validation_error_required() {
        let err = ValidationError::required("family");
        assert_eq!(err.to_string(), "Required field 'family' is missing");
    }

    #[test]
    fn test_validation_error_invalid_enum() {
        let err = ValidationError::invalid_enum("idle", "float", "coast, brake");
        let msg = err.to_string();
        assert!(msg.contains("float"));
        assert!(msg.contains("coast, brake"));
    }

    #[test]
    fn test_validation_error_equality() {
        assert_eq!(
            ValidationError::required("field"),
            ValidationError::required("field")
        );
    }
}
