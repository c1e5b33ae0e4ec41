//! Error types for request construction and value coercion

/// Typed coercion of a parameter value failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// Value present but not convertible to the requested type
    #[error("value {value:?} at index {index} of parameter '{parameter}' is not a valid {target}: {reason}")]
    Malformed {
        /// Fully-qualified parameter name
        parameter: String,
        /// Index of the offending value
        index: usize,
        /// Raw value
        value: String,
        /// Requested type
        target: &'static str,
        /// Parser message
        reason: String,
    },
}

impl CoercionError {
    /// Index of the value that failed to convert
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Malformed { index, .. } => *index,
        }
    }
}

/// Raw input rejected by [`RequestConfig`](crate::RequestConfig) limits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    /// Too many distinct parameters
    #[error("too many parameters: {count} (max: {max})")]
    TooManyParameters { count: usize, max: usize },

    /// Too many values for one parameter
    #[error("too many values for parameter '{name}': {count} (max: {max})")]
    TooManyValues {
        name: String,
        count: usize,
        max: usize,
    },

    /// Parameter name too long
    #[error("parameter name too long: {length} bytes (max: {max})")]
    NameTooLong { length: usize, max: usize },
}
