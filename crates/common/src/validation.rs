//! Field validators
//!
//! Small reusable checks applied to caller input before it is embedded in a
//! request path.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_ID: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[0-9]+$").ok());

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value, describing the problem on failure.
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Accepts strings made only of ASCII digits.
///
/// Provider resource ids are integers on the wire but are passed around as
/// strings; anything else would produce a different path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericIdValidator;

impl NumericIdValidator {
    /// Create a new validator.
    pub const fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for NumericIdValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let is_numeric = match NUMERIC_ID.as_ref() {
            Some(pattern) => pattern.is_match(value),
            None => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
        };
        if is_numeric {
            Ok(())
        } else {
            Err(format!("expected a numeric id, got {value:?}"))
        }
    }
}

/// Non-empty string check with optional trimming.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotBlankValidator {
    trim: bool,
}

impl NotBlankValidator {
    /// Create a validator that rejects empty strings.
    pub const fn new() -> Self {
        Self { trim: false }
    }

    /// Treat whitespace-only strings as empty.
    #[must_use]
    pub const fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl FieldValidator<str> for NotBlankValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let candidate = if self.trim { value.trim() } else { value };
        if candidate.is_empty() {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_pass() {
        let validator = NumericIdValidator::new();
        assert!(validator.validate("0").is_ok());
        assert!(validator.validate("1234567890").is_ok());
    }

    #[test]
    fn non_numeric_ids_fail() {
        let validator = NumericIdValidator::new();
        for value in ["", "12a", "-1", "1.5", " 12", "12/../13", "١٢"] {
            assert!(validator.validate(value).is_err(), "{value:?} should be rejected");
        }
    }

    #[test]
    fn not_blank_honours_trim() {
        assert!(NotBlankValidator::new().validate("  ").is_ok());
        assert!(NotBlankValidator::new().trim(true).validate("  ").is_err());
        assert!(NotBlankValidator::new().validate("").is_err());
    }
}
