//! Input validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Length of a Vehicle Identification Number.
pub const VIN_LENGTH: usize = 17;

/// VIN alphabet: digits and uppercase letters except I, O and Q.
static VIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap_or_else(|e| panic!("VIN pattern: {e}"))
});

/// Validates values of a specific type.
pub trait Validator {
    /// The type of value being validated.
    type Input: ?Sized;

    /// Returns an error if `value` is not acceptable.
    fn validate(&self, value: &Self::Input) -> Result<(), ValidationError>;
}

/// Checks that a string is a well-formed 17-character VIN.
#[derive(Debug, Clone, Copy, Default)]
pub struct VinValidator;

impl VinValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }
}

impl Validator for VinValidator {
    type Input = str;

    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let actual = value.chars().count();
        if actual != VIN_LENGTH {
            return Err(ValidationError::Length {
                expected: VIN_LENGTH,
                actual,
            });
        }

        if VIN_PATTERN.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::InvalidCharacters(value.to_string()))
        }
    }
}
