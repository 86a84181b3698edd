//! Validation utilities.

use crate::NorthwindError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `NorthwindError` on failure.
    fn validate_model(&self) -> Result<(), NorthwindError> {
        self.validate().map_err(validation_errors_to_northwind_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `NorthwindError`.
///
/// Field errors are sorted by field name so the message is stable.
#[must_use]
pub fn validation_errors_to_northwind_error(errors: ValidationErrors) -> NorthwindError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string());
                ((*field).to_string(), message)
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ");

    NorthwindError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that an identifier is a positive integer.
    pub fn positive_id(id: i32) -> Result<(), ValidationError> {
        if id <= 0 {
            return Err(ValidationError::new("id_not_positive"));
        }
        Ok(())
    }

    /// Fractional digits kept by money columns.
    pub const MONEY_SCALE: i32 = 4;

    /// Exclusive upper bound of money columns (`DECIMAL(19,4)`).
    pub const MONEY_LIMIT: f64 = 1e15;

    /// Validates that an amount is finite, non-negative and stored without
    /// rounding in a money column.
    pub fn money(value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::new("not_finite"));
        }
        if value < 0.0 {
            return Err(ValidationError::new("negative"));
        }
        if value >= MONEY_LIMIT {
            return Err(ValidationError::new("out_of_range"));
        }
        let factor = 10_f64.powi(MONEY_SCALE);
        if (value * factor).round() / factor != value {
            return Err(ValidationError::new("too_many_decimals"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 4))]
        code: String,
        #[validate(range(min = 0.0))]
        price: f64,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_positive_id() {
        assert!(positive_id(1).is_ok());
        assert!(positive_id(0).is_err());
        assert!(positive_id(-3).is_err());
    }

    #[test]
    fn test_money() {
        assert!(money(0.0).is_ok());
        assert!(money(13.5).is_ok());
        assert!(money(0.1).is_ok());
        assert!(money(1.2346).is_ok());
        assert!(money(999_999_999.9999).is_ok());

        assert_eq!(money(f64::NAN).unwrap_err().code, "not_finite");
        assert_eq!(money(f64::INFINITY).unwrap_err().code, "not_finite");
        assert_eq!(money(-0.5).unwrap_err().code, "negative");
        assert_eq!(money(1e15).unwrap_err().code, "out_of_range");
        assert_eq!(money(1.23456).unwrap_err().code, "too_many_decimals");
    }

    #[test]
    fn test_validate_model_ok() {
        let sample = Sample { code: "P1".to_string(), price: 1.5 };
        assert!(sample.validate_model().is_ok());
    }

    #[test]
    fn test_validate_model_lists_every_field() {
        let sample = Sample { code: "TOO-LONG".to_string(), price: -1.0 };
        let err = sample.validate_model().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("code: length"));
        assert!(message.contains("price: range"));
    }
}
