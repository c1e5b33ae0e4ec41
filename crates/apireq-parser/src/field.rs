//! Per-value parsers
//!
//! A [`FieldParser`] turns one raw parameter value into typed output, or
//! `None` when the value does not fit.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use apireq_request::is_truthy;

/// Parser for a single parameter value
///
/// Any `Fn(&str) -> Option<O> + Send + Sync` is a field parser.
pub trait FieldParser: Send + Sync {
    /// Parsed value type
    type Output;

    /// Parse one raw value
    fn parse_field(&self, field: &str) -> Option<Self::Output>;
}

impl<F, O> FieldParser for F
where
    F: Fn(&str) -> Option<O> + Send + Sync,
{
    type Output = O;

    #[inline]
    fn parse_field(&self, field: &str) -> Option<O> {
        self(field)
    }
}

/// Field parser backed by [`FromStr`]
pub struct Parsed<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Parsed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsed<{}>", std::any::type_name::<T>())
    }
}

impl<T> Clone for Parsed<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Parsed<T> {}

impl<T: FromStr> FieldParser for Parsed<T> {
    type Output = T;

    #[inline]
    fn parse_field(&self, field: &str) -> Option<T> {
        field.parse().ok()
    }
}

/// Parse values with [`FromStr`], dropping malformed ones
///
/// # Example
/// ```
/// use apireq_parser::{parsed, FieldParser};
///
/// assert_eq!(parsed::<i32>().parse_field("42"), Some(42));
/// assert_eq!(parsed::<i32>().parse_field("bad"), None);
/// ```
#[inline]
#[must_use]
pub fn parsed<T: FromStr>() -> Parsed<T> {
    Parsed {
        _marker: PhantomData,
    }
}

/// Lenient flag parser, see [`apireq_request::is_truthy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl FieldParser for Boolean {
    type Output = bool;

    #[inline]
    fn parse_field(&self, field: &str) -> Option<bool> {
        Some(is_truthy(field))
    }
}

/// Parse every value as a lenient flag
#[inline]
#[must_use]
pub fn boolean() -> Boolean {
    Boolean
}

/// Identity parser keeping every value
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl FieldParser for Text {
    type Output = String;

    #[inline]
    fn parse_field(&self, field: &str) -> Option<String> {
        Some(field.to_string())
    }
}

/// Keep every value as an owned string
#[inline]
#[must_use]
pub fn text() -> Text {
    Text
}

/// Identity parser dropping empty values
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmpty;

impl FieldParser for NonEmpty {
    type Output = String;

    #[inline]
    fn parse_field(&self, field: &str) -> Option<String> {
        if field.is_empty() {
            None
        } else {
            Some(field.to_string())
        }
    }
}

/// Keep non-empty values as owned strings
#[inline]
#[must_use]
pub fn non_empty() -> NonEmpty {
    NonEmpty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_accepts_well_formed() {
        assert_eq!(parsed::<i32>().parse_field("-7"), Some(-7));
        assert_eq!(parsed::<f64>().parse_field("2.5"), Some(2.5));
        assert_eq!(parsed::<u8>().parse_field("256"), None);
        assert_eq!(parsed::<i32>().parse_field(" 1"), None);
    }

    #[test]
    fn boolean_is_lenient() {
        let parser = boolean();
        for truthy in ["", "TRUE", "1", " true "] {
            assert_eq!(parser.parse_field(truthy), Some(true), "{truthy:?}");
        }
        for falsy in ["0", "false", "no"] {
            assert_eq!(parser.parse_field(falsy), Some(false), "{falsy:?}");
        }
    }

    #[test]
    fn text_and_non_empty() {
        assert_eq!(text().parse_field(""), Some(String::new()));
        assert_eq!(non_empty().parse_field(""), None);
        assert_eq!(non_empty().parse_field("x"), Some("x".to_string()));
    }

    #[test]
    fn closures_are_field_parsers() {
        let upper = |field: &str| Some(field.to_uppercase());
        assert_eq!(upper.parse_field("abc"), Some("ABC".to_string()));
    }
}
