//! Request validator trait and combinators

use std::fmt;

use apireq_request::Request;

use crate::error::ValidationError;
use crate::field::FieldValidator;
use crate::validation::Validation;

/// Pure function from a request to a [`Validation`]
///
/// Validators never fail on bad input: problems are reported as errors in
/// the returned validation. Any `Fn(&dyn Request) -> Validation + Send +
/// Sync` is a validator; use [`from_fn`] to help closure type inference.
pub trait Validator: Send + Sync {
    /// Validate a request
    fn validate(&self, request: &dyn Request) -> Validation;

    /// Erase the validator type
    #[inline]
    fn boxed<'a>(self) -> BoxedValidator<'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

/// Type-erased validator, for heterogeneous collections
pub type BoxedValidator<'a> = Box<dyn Validator + 'a>;

impl<F> Validator for F
where
    F: Fn(&dyn Request) -> Validation + Send + Sync,
{
    #[inline]
    fn validate(&self, request: &dyn Request) -> Validation {
        self(request)
    }
}

impl<'a> Validator for Box<dyn Validator + 'a> {
    #[inline]
    fn validate(&self, request: &dyn Request) -> Validation {
        (**self).validate(request)
    }
}

/// Identity helper pinning a closure's signature to the validator shape
#[inline]
pub fn from_fn<F>(validator: F) -> F
where
    F: Fn(&dyn Request) -> Validation + Send + Sync,
{
    validator
}

/// Report a parameter error when `name` is missing
///
/// The message is `The field <name> is required.`
///
/// # Example
/// ```
/// use apireq_request::StaticRequest;
/// use apireq_validator::{required, Validator};
///
/// let validation = required("id").validate(&StaticRequest::empty());
/// assert_eq!(validation.len(), 1);
/// assert_eq!(validation.report()[0].description, "The field id is required.");
/// ```
#[must_use]
pub fn required(name: impl Into<String>) -> Required {
    let name = name.into();
    let message = format!("The field {name} is required.");
    Required { name, message }
}

/// Report a parameter error with `message` when `name` is missing
#[must_use]
pub fn required_with(name: impl Into<String>, message: impl Into<String>) -> Required {
    Required {
        name: name.into(),
        message: message.into(),
    }
}

/// Run a field validator against every value of one parameter
///
/// Each message reported for the value at index `i` becomes one
/// [`ValidationError::ParameterValue`] at `i`. A missing parameter has no
/// value and so produces no error; combine with [`required`] for that.
#[inline]
#[must_use]
pub fn field<V: FieldValidator>(name: impl Into<String>, validator: V) -> Field<V> {
    Field {
        name: name.into(),
        validator,
    }
}

/// Run a validator against the scoped view below `name`
#[inline]
#[must_use]
pub fn scope<V: Validator>(name: impl Into<String>, validator: V) -> Scope<V> {
    Scope {
        name: name.into(),
        validator,
    }
}

/// Run every validator and union their errors
///
/// No validator is skipped, whatever the others report.
#[inline]
#[must_use]
pub fn all<V: Validator>(validators: impl IntoIterator<Item = V>) -> All<V> {
    All {
        validators: validators.into_iter().collect(),
    }
}

/// See [`required`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Required {
    name: String,
    message: String,
}

impl Validator for Required {
    fn validate(&self, request: &dyn Request) -> Validation {
        let validation = Validation::new(request);
        if request.contains(&self.name) {
            return validation;
        }
        validation.with_error(ValidationError::parameter(
            request.parameter(&self.name),
            self.message.clone(),
        ))
    }
}

/// See [`field`]
#[derive(Debug, Clone)]
pub struct Field<V> {
    name: String,
    validator: V,
}

impl<V: FieldValidator> Validator for Field<V> {
    fn validate(&self, request: &dyn Request) -> Validation {
        let parameter = request.parameter(&self.name);
        let mut errors = Vec::new();

        for (index, value) in parameter.iter().enumerate() {
            for message in self.validator.validate_field(value).errors() {
                errors.push(ValidationError::ParameterValue {
                    parameter: parameter.clone(),
                    index,
                    description: message.clone(),
                });
            }
        }

        if !errors.is_empty() {
            tracing::trace!("{} invalid value(s) in '{}'", errors.len(), parameter.path());
        }
        Validation::new(request).with_errors(errors)
    }
}

/// See [`scope`]
#[derive(Debug, Clone)]
pub struct Scope<V> {
    name: String,
    validator: V,
}

impl<V: Validator> Validator for Scope<V> {
    #[inline]
    fn validate(&self, request: &dyn Request) -> Validation {
        self.validator.validate(&request.scope(&self.name))
    }
}

/// See [`all`]
#[derive(Debug, Clone)]
pub struct All<V> {
    validators: Vec<V>,
}

impl<V: Validator> Validator for All<V> {
    fn validate(&self, request: &dyn Request) -> Validation {
        self.validators
            .iter()
            .fold(Validation::new(request), |validation, validator| {
                validation.merge(validator.validate(request))
            })
    }
}

/// Owned, growable conjunction of validators
///
/// # Example
/// ```
/// use apireq_request::StaticRequest;
/// use apireq_validator::{required, CompoundValidator, Validator};
///
/// let validator = CompoundValidator::new()
///     .with_validator(required("x"))
///     .with_validator(required("y"));
///
/// assert_eq!(validator.len(), 2);
/// assert_eq!(validator.validate(&StaticRequest::empty()).len(), 2);
/// ```
#[derive(Default)]
pub struct CompoundValidator {
    validators: Vec<BoxedValidator<'static>>,
}

impl CompoundValidator {
    /// Create an empty compound validator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a validator
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(validator.boxed());
        self
    }

    /// Builder: add several validators
    #[must_use]
    pub fn with_validators<V>(mut self, validators: impl IntoIterator<Item = V>) -> Self
    where
        V: Validator + 'static,
    {
        self.validators
            .extend(validators.into_iter().map(Validator::boxed));
        self
    }

    /// Number of validators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if there is no validator
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for CompoundValidator {
    fn validate(&self, request: &dyn Request) -> Validation {
        let validation = self
            .validators
            .iter()
            .fold(Validation::new(request), |validation, validator| {
                validation.merge(validator.validate(request))
            });
        tracing::debug!(
            "Ran {} validators, found {} error(s)",
            self.validators.len(),
            validation.len()
        );
        validation
    }
}

impl fmt::Debug for CompoundValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundValidator")
            .field("validators", &self.validators.len())
            .finish()
    }
}
