//! Submit-time validation for form drafts

use crate::field_errors::FieldErrors;

/// Trait for validating a draft before it is sent to the backend
pub trait Validate {
    /// Validate the draft
    ///
    /// Returns an empty map if valid, or one message per offending field.
    /// Field names use the wire (camelCase) spelling so local and server
    /// errors land on the same inputs.
    fn validate(&self) -> FieldErrors;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Common validation helpers
pub mod validators {
    use crate::field_errors::FieldErrors;

    pub const REQUIRED: &str = "required";

    /// Require a non-blank string
    pub fn required(errors: &mut FieldErrors, field: &str, value: &str) {
        if value.trim().is_empty() {
            errors.set(field, REQUIRED);
        }
    }

    /// Require a selected identifier
    pub fn required_id(errors: &mut FieldErrors, field: &str, value: Option<i64>) {
        if value.is_none_or(|id| id <= 0) {
            errors.set(field, REQUIRED);
        }
    }

    /// Cap the length of a string (counted in characters)
    pub fn max_len(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            errors.set(field, format!("must be at most {max} characters"));
        }
    }

    /// Require a strictly positive number
    pub fn positive(errors: &mut FieldErrors, field: &str, value: f64) {
        if value.is_nan() || value <= 0.0 {
            errors.set(field, "must be greater than zero");
        }
    }

    /// Require a non-empty list
    pub fn non_empty<T>(errors: &mut FieldErrors, field: &str, values: &[T]) {
        if values.is_empty() {
            errors.set(field, "select at least one");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use crate::field_errors::FieldErrors;

    #[test]
    fn test_required_rejects_blank() {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", "   ");
        required(&mut errors, "code", "CL");
        assert_eq!(errors.get("name"), Some(REQUIRED));
        assert!(!errors.contains("code"));
    }

    #[test]
    fn test_required_id() {
        let mut errors = FieldErrors::new();
        required_id(&mut errors, "countryId", None);
        required_id(&mut errors, "regionId", Some(0));
        required_id(&mut errors, "venueId", Some(12));
        assert!(errors.contains("countryId"));
        assert!(errors.contains("regionId"));
        assert!(!errors.contains("venueId"));
    }

    #[test]
    fn test_max_len_counts_chars() {
        let mut errors = FieldErrors::new();
        max_len(&mut errors, "code", "ÑÑÑ", 3);
        assert!(errors.is_empty());
        max_len(&mut errors, "code", "ABCD", 3);
        assert_eq!(errors.get("code"), Some("must be at most 3 characters"));
    }

    #[test]
    fn test_positive_and_non_empty() {
        let mut errors = FieldErrors::new();
        positive(&mut errors, "basePrice", 0.0);
        non_empty::<i64>(&mut errors, "artists", &[]);
        assert_eq!(errors.len(), 2);
    }
}
