//! Validation error types

use apireq_request::{Parameter, RequestRef};
use serde::Serialize;
use thiserror::Error;

use crate::validation::Validation;

/// Structured problem found in a request
///
/// Equality and hashing are structural, so reporting the same problem
/// twice yields a single error in a [`Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// Problem with the request as a whole
    #[error("{description}")]
    Request {
        /// Request the problem was found in
        request: RequestRef,
        /// Human-readable message
        description: String,
    },

    /// Problem with one parameter
    #[error("{}: {description}", .parameter.path())]
    Parameter {
        /// Offending parameter
        parameter: Parameter,
        /// Human-readable message
        description: String,
    },

    /// Problem with one value of a parameter
    #[error("{}[{index}]: {description}", .parameter.path())]
    ParameterValue {
        /// Parameter holding the value
        parameter: Parameter,
        /// Index of the offending value
        index: usize,
        /// Human-readable message
        description: String,
    },
}

impl ValidationError {
    /// Create a request-level error
    #[must_use]
    pub fn request(request: RequestRef, description: impl Into<String>) -> Self {
        Self::Request {
            request,
            description: description.into(),
        }
    }

    /// Create a parameter-level error
    #[must_use]
    pub fn parameter(parameter: Parameter, description: impl Into<String>) -> Self {
        Self::Parameter {
            parameter,
            description: description.into(),
        }
    }

    /// Create an error for the value at `index`
    ///
    /// # Errors
    /// Returns [`ValueIndexOutOfRange`] if `parameter` has no value at
    /// `index`. This signals a bug in the calling validator, not bad input.
    pub fn parameter_value(
        parameter: Parameter,
        index: usize,
        description: impl Into<String>,
    ) -> Result<Self, ValueIndexOutOfRange> {
        if index >= parameter.len() {
            return Err(ValueIndexOutOfRange {
                parameter: parameter.path(),
                index,
                len: parameter.len(),
            });
        }
        Ok(Self::ParameterValue {
            parameter,
            index,
            description: description.into(),
        })
    }

    /// Human-readable message
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Request { description, .. }
            | Self::Parameter { description, .. }
            | Self::ParameterValue { description, .. } => description,
        }
    }

    /// Request the error was found in
    #[must_use]
    pub fn request_ref(&self) -> &RequestRef {
        match self {
            Self::Request { request, .. } => request,
            Self::Parameter { parameter, .. } | Self::ParameterValue { parameter, .. } => {
                parameter.request()
            }
        }
    }

    /// Offending parameter, if any
    #[must_use]
    pub fn parameter_ref(&self) -> Option<&Parameter> {
        match self {
            Self::Request { .. } => None,
            Self::Parameter { parameter, .. } | Self::ParameterValue { parameter, .. } => {
                Some(parameter)
            }
        }
    }

    /// Index of the offending value, if any
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::ParameterValue { index, .. } => Some(*index),
            Self::Request { .. } | Self::Parameter { .. } => None,
        }
    }

    /// Serializable view of this error
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            description: self.description().to_string(),
            parameter: self.parameter_ref().map(Parameter::path),
            index: self.index(),
        }
    }
}

/// A value error was built for an index the parameter does not have
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value index {index} out of range for parameter '{parameter}' with {len} values")]
pub struct ValueIndexOutOfRange {
    /// Fully-qualified parameter name
    pub parameter: String,
    /// Requested index
    pub index: usize,
    /// Number of values of the parameter
    pub len: usize,
}

/// Export shape of a [`ValidationError`]
///
/// `parameter` is the fully-qualified dotted name. Absent fields are
/// skipped when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Human-readable message
    pub description: String,

    /// Fully-qualified parameter name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    /// Index of the offending value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// Request failed validation
///
/// Carries the full [`Validation`], including the validated request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid request: {} error(s)", .validation.len())]
pub struct InvalidRequest {
    validation: Validation,
}

impl InvalidRequest {
    pub(crate) fn new(validation: Validation) -> Self {
        Self { validation }
    }

    /// Failed validation
    #[inline]
    #[must_use]
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// Take the failed validation
    #[inline]
    #[must_use]
    pub fn into_validation(self) -> Validation {
        self.validation
    }

    /// Serializable view of every error
    #[must_use]
    pub fn report(&self) -> Vec<ErrorReport> {
        self.validation.report()
    }
}
