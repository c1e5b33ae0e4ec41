//! Per-value validation
//!
//! A [`FieldValidator`] checks one raw parameter value and reports its
//! problems as a [`FieldValidation`].

use std::str::FromStr;

use indexmap::IndexSet;

/// Set of messages reported against a single value
///
/// Messages are deduplicated and kept in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidation {
    errors: IndexSet<String>,
}

impl FieldValidation {
    /// Create an empty (valid) field validation
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a message
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.add_error(error);
        self
    }

    /// Add a message
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.insert(error.into());
    }

    /// Replace every message
    pub fn set_errors<I, S>(&mut self, errors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors = errors.into_iter().map(Into::into).collect();
    }

    /// Check if no message was reported
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if at least one message was reported
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Reported messages
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &IndexSet<String> {
        &self.errors
    }
}

impl<S: Into<String>> FromIterator<S> for FieldValidation {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut validation = Self::new();
        validation.set_errors(iter);
        validation
    }
}

/// Validator for a single parameter value
///
/// Any `Fn(&str) -> FieldValidation + Send + Sync` is a field validator.
pub trait FieldValidator: Send + Sync {
    /// Validate one raw value
    fn validate_field(&self, field: &str) -> FieldValidation;
}

impl<F> FieldValidator for F
where
    F: Fn(&str) -> FieldValidation + Send + Sync,
{
    #[inline]
    fn validate_field(&self, field: &str) -> FieldValidation {
        self(field)
    }
}

fn check(valid: bool, message: &str) -> FieldValidation {
    if valid {
        FieldValidation::new()
    } else {
        FieldValidation::new().with_error(message)
    }
}

/// Report `message` when the value does not parse as `T`
///
/// # Example
/// ```
/// use apireq_validator::{parses_as, FieldValidator};
///
/// let integer = parses_as::<i32>("not an integer");
/// assert!(integer.validate_field("12").is_valid());
/// assert!(integer.validate_field("twelve").has_errors());
/// ```
pub fn parses_as<T: FromStr>(message: impl Into<String>) -> impl FieldValidator {
    let message = message.into();
    move |field: &str| check(field.parse::<T>().is_ok(), &message)
}

/// Report `message` when the value is empty or whitespace only
pub fn non_blank(message: impl Into<String>) -> impl FieldValidator {
    let message = message.into();
    move |field: &str| check(!field.trim().is_empty(), &message)
}

/// Report `message` when the value is not one of `allowed`
pub fn one_of<I, S>(allowed: I, message: impl Into<String>) -> impl FieldValidator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: IndexSet<String> = allowed.into_iter().map(Into::into).collect();
    let message = message.into();
    move |field: &str| check(allowed.contains(field), &message)
}

/// Report `message` when the value has more than `max` characters
pub fn max_length(max: usize, message: impl Into<String>) -> impl FieldValidator {
    let message = message.into();
    move |field: &str| check(field.chars().count() <= max, &message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_validation_deduplicates() {
        let mut validation = FieldValidation::new().with_error("a").with_error("b");
        validation.add_error("a");
        assert_eq!(validation.errors().len(), 2);
        assert!(validation.has_errors());
        assert!(!validation.is_valid());

        validation.set_errors(Vec::<String>::new());
        assert!(validation.is_valid());
    }

    #[test]
    fn field_validation_from_iter() {
        let validation: FieldValidation = ["x", "y", "x"].into_iter().collect();
        assert_eq!(
            validation.errors().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["x", "y"]
        );
    }

    #[test]
    fn parses_as_reports_message() {
        let validator = parses_as::<u16>("bad port");
        assert!(validator.validate_field("8080").is_valid());
        assert_eq!(
            validator.validate_field("70000"),
            FieldValidation::new().with_error("bad port")
        );
    }

    #[test]
    fn non_blank_rejects_whitespace() {
        let validator = non_blank("blank");
        assert!(validator.validate_field(" x ").is_valid());
        assert!(validator.validate_field("   ").has_errors());
        assert!(validator.validate_field("").has_errors());
    }

    #[test]
    fn one_of_is_exact() {
        let validator = one_of(["asc", "desc"], "bad order");
        assert!(validator.validate_field("asc").is_valid());
        assert!(validator.validate_field("ASC").has_errors());
    }

    #[test]
    fn max_length_counts_chars() {
        let validator = max_length(3, "too long");
        assert!(validator.validate_field("été").is_valid());
        assert!(validator.validate_field("abcd").has_errors());
    }

    #[test]
    fn closures_are_field_validators() {
        let even = |field: &str| {
            let mut validation = FieldValidation::new();
            if field.len() % 2 == 1 {
                validation.add_error("odd length");
            }
            validation
        };
        assert!(even.validate_field("ab").is_valid());
        assert!(even.validate_field("abc").has_errors());
    }
}
