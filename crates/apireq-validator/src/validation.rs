//! Validation results
//!
//! A [`Validation`] is an immutable set of [`ValidationError`]s plus the
//! request they were found in. Combining validations is set union.

use apireq_request::{Request, RequestRef};
use indexmap::IndexSet;

use crate::error::{ErrorReport, InvalidRequest, ValidationError};

/// Accumulated outcome of validating a request
///
/// # Example
/// ```
/// use apireq_request::{Request, StaticRequest};
/// use apireq_validator::{Validation, ValidationError};
///
/// let request = StaticRequest::empty();
/// let error = ValidationError::request(request.to_ref(), "empty request");
///
/// let validation = Validation::new(&request).with_error(error.clone());
/// assert!(validation.is_invalid());
///
/// let twice = validation.clone().with_error(error);
/// assert_eq!(twice.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Validated request
    request: RequestRef,

    /// Errors found, deduplicated, in discovery order
    errors: IndexSet<ValidationError>,
}

impl Validation {
    /// Create an empty (valid) validation of `request`
    #[must_use]
    pub fn new(request: &dyn Request) -> Self {
        Self::from_ref(request.to_ref())
    }

    /// Create an empty (valid) validation from a request handle
    #[inline]
    #[must_use]
    pub fn from_ref(request: RequestRef) -> Self {
        Self {
            request,
            errors: IndexSet::new(),
        }
    }

    /// Builder: add one error
    #[must_use]
    pub fn with_error(mut self, error: ValidationError) -> Self {
        self.errors.insert(error);
        self
    }

    /// Builder: add several errors
    #[must_use]
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = ValidationError>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Union with another validation
    ///
    /// The result keeps the request of `self`.
    #[must_use]
    pub fn merge(self, other: Validation) -> Self {
        self.with_errors(other.errors)
    }

    /// Union of several validations
    ///
    /// The result keeps the request of the first validation. Returns `None`
    /// when `validations` is empty, since there is no request to keep.
    pub fn concat(validations: impl IntoIterator<Item = Validation>) -> Option<Self> {
        let mut validations = validations.into_iter();
        let first = validations.next()?;
        Some(validations.fold(first, Self::merge))
    }

    /// Check if no error was found
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if at least one error was found
    #[inline]
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors found
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &IndexSet<ValidationError> {
        &self.errors
    }

    /// Number of errors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if there is no error
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over errors
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Validated request
    #[inline]
    #[must_use]
    pub fn request(&self) -> &RequestRef {
        &self.request
    }

    /// Turn an invalid outcome into an error
    ///
    /// # Errors
    /// Returns [`InvalidRequest`] carrying this validation if it holds at
    /// least one error.
    pub fn assert_valid(self) -> Result<(), InvalidRequest> {
        if self.is_valid() {
            return Ok(());
        }
        tracing::debug!(
            "Request failed validation with {} error(s)",
            self.errors.len()
        );
        Err(InvalidRequest::new(self))
    }

    /// Serializable view of every error, in discovery order
    #[must_use]
    pub fn report(&self) -> Vec<ErrorReport> {
        self.errors.iter().map(ValidationError::report).collect()
    }
}

impl<'a> IntoIterator for &'a Validation {
    type Item = &'a ValidationError;
    type IntoIter = indexmap::set::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for Validation {
    type Item = ValidationError;
    type IntoIter = indexmap::set::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
