//! Request parameters
//!
//! Provides [`Parameter`], a named, ordered, multi-valued field of a request.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::CoercionError;
use crate::request::{Request, RequestRef};

/// Named sequence of string values within a request
///
/// Looking up a missing name never fails: it yields an *unregistered*
/// parameter with no values, so callers handle "missing" and "present"
/// the same way.
///
/// # Example
/// ```
/// use apireq_request::{Request, StaticRequest};
///
/// let request = StaticRequest::from_values([("tags", vec!["a", "b"])]);
/// let tags = request.parameter("tags");
///
/// assert_eq!(tags.len(), 2);
/// assert_eq!(tags.get(1), Some("b"));
/// assert_eq!(tags.get(2), None);
/// assert!(request.parameter("missing").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Request this parameter was read from
    request: RequestRef,

    /// Name, local to `request`
    name: String,

    /// Backing values, if the name exists
    registration: Registration,
}

/// Whether a parameter is backed by request data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Registration {
    /// Present in the request, possibly with zero values
    Registered(Arc<[String]>),

    /// Missing from the request
    Unregistered,
}

impl Parameter {
    /// Create a parameter backed by request values
    #[inline]
    #[must_use]
    pub(crate) fn registered(
        request: RequestRef,
        name: impl Into<String>,
        values: Arc<[String]>,
    ) -> Self {
        Self {
            request,
            name: name.into(),
            registration: Registration::Registered(values),
        }
    }

    /// Create the sentinel for a missing name
    #[inline]
    #[must_use]
    pub(crate) fn unregistered(request: RequestRef, name: impl Into<String>) -> Self {
        Self {
            request,
            name: name.into(),
            registration: Registration::Unregistered,
        }
    }

    /// Name of the parameter within its request
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified name within the root request
    ///
    /// For a parameter read through the scope `user`, `name()` is `city`
    /// while `path()` is `user.city`.
    #[must_use]
    pub fn path(&self) -> String {
        self.request.qualify(&self.name)
    }

    /// Owning request
    #[inline]
    #[must_use]
    pub fn request(&self) -> &RequestRef {
        &self.request
    }

    /// Check if the parameter exists in its request
    #[inline]
    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(self.registration, Registration::Registered(_))
    }

    fn slice(&self) -> &[String] {
        match &self.registration {
            Registration::Registered(values) => values,
            Registration::Unregistered => &[],
        }
    }

    /// Number of values
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slice().len()
    }

    /// Check if the parameter has no value
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slice().is_empty()
    }

    /// Value at `index`, if any
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slice().get(index).map(String::as_str)
    }

    /// Owned copy of all values
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.slice().to_vec()
    }

    /// Iterator over values, in request order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slice().iter().map(String::as_str)
    }

    /// Parse the value at `index` with [`FromStr`]
    ///
    /// # Errors
    /// Returns [`CoercionError::Malformed`] if the value exists but does
    /// not parse. A missing index is `Ok(None)`.
    pub fn parse_as<T>(&self, index: usize) -> Result<Option<T>, CoercionError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(index)
            .map(|value| {
                value.parse::<T>().map_err(|err| CoercionError::Malformed {
                    parameter: self.path(),
                    index,
                    value: value.to_string(),
                    target: std::any::type_name::<T>(),
                    reason: err.to_string(),
                })
            })
            .transpose()
    }

    /// Value at `index` as a 32-bit integer
    ///
    /// # Errors
    /// See [`Self::parse_as`].
    #[inline]
    pub fn as_integer(&self, index: usize) -> Result<Option<i32>, CoercionError> {
        self.parse_as(index)
    }

    /// Value at `index` as a 64-bit integer
    ///
    /// # Errors
    /// See [`Self::parse_as`].
    #[inline]
    pub fn as_long(&self, index: usize) -> Result<Option<i64>, CoercionError> {
        self.parse_as(index)
    }

    /// Value at `index` as a 64-bit float
    ///
    /// # Errors
    /// See [`Self::parse_as`].
    #[inline]
    pub fn as_double(&self, index: usize) -> Result<Option<f64>, CoercionError> {
        self.parse_as(index)
    }

    /// Value at `index` as a 32-bit float
    ///
    /// # Errors
    /// See [`Self::parse_as`].
    #[inline]
    pub fn as_float(&self, index: usize) -> Result<Option<f32>, CoercionError> {
        self.parse_as(index)
    }

    /// Value at `index` as a flag
    ///
    /// Lenient: after trimming and lowercasing, `""`, `"true"` and `"1"`
    /// are true and anything else is false. A bare `?verbose` flag is
    /// therefore on.
    #[inline]
    #[must_use]
    pub fn as_boolean(&self, index: usize) -> Option<bool> {
        self.get(index).map(is_truthy)
    }
}

/// Lenient flag interpretation shared by every boolean accessor
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    let content = value.trim().to_lowercase();
    content.is_empty() || content == "true" || content == "1"
}

impl<'a> IntoIterator for &'a Parameter {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.slice().iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Parameter", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("values", self.slice())?;
        state.end()
    }
}
