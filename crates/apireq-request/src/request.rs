//! Requests and request handles
//!
//! Provides the [`Request`] trait, the root [`StaticRequest`] built from raw
//! input, and [`RequestRef`], the owned handle used for back-references.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::RequestConfig;
use crate::error::IngestError;
use crate::parameter::Parameter;
use crate::path::ScopePath;
use crate::scoped::ScopedRequest;

/// Read-only, name-addressable view over request parameters
///
/// Implemented by the root [`StaticRequest`] and by the lazy
/// [`ScopedRequest`] view, so parsers and validators run unchanged against
/// a whole request or any nested scope of it.
pub trait Request: fmt::Debug + Send + Sync {
    /// Check if a parameter with this name exists
    fn contains(&self, name: &str) -> bool;

    /// Number of parameters
    fn len(&self) -> usize;

    /// Check if the request has no parameter
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parameter by name
    ///
    /// Never fails: unknown names yield an unregistered parameter.
    fn parameter(&self, name: &str) -> Parameter;

    /// Snapshot of all parameters, in insertion order
    fn parameters(&self) -> Vec<Parameter>;

    /// Lazy view of the parameters below `prefix`
    ///
    /// `scope("a").scope("b")` is equivalent to `scope("a.b")`.
    fn scope(&self, prefix: &str) -> ScopedRequest;

    /// Materialized copy of the parameters below `prefix`
    ///
    /// Unlike [`Request::scope`], a parameter named exactly `prefix` is
    /// kept under the empty name.
    fn project(&self, prefix: &str) -> StaticRequest;

    /// Owned handle to this request
    fn to_ref(&self) -> RequestRef;
}

/// Root request built from raw input
///
/// Cheap to clone: clones share the same immutable snapshot and compare
/// equal. Use [`StaticRequest::detach`] for an independent copy.
///
/// # Example
/// ```
/// use apireq_request::{Request, StaticRequest};
///
/// let request = StaticRequest::from_raw([
///     ("user.name", vec![Some("ada")]),
///     ("user.admin", vec![None]),
/// ]);
///
/// let user = request.scope("user");
/// assert_eq!(user.parameter("name").get(0), Some("ada"));
/// assert_eq!(user.parameter("admin").as_boolean(0), Some(true));
/// ```
#[derive(Clone)]
pub struct StaticRequest {
    inner: Arc<RequestInner>,
}

#[derive(Debug, Default)]
struct RequestInner {
    parameters: IndexMap<String, Arc<[String]>>,
}

impl StaticRequest {
    /// Empty request
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::from_map(IndexMap::new())
    }

    /// Build from raw input where values may be missing
    ///
    /// Missing values become empty strings. A name given twice gets the
    /// values of both entries, in order.
    #[must_use]
    pub fn from_raw<I, K, V, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self::from_map(collect_raw(raw))
    }

    /// Build from raw input where every value is present
    #[must_use]
    pub fn from_values<I, K, V, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_raw(
            raw.into_iter()
                .map(|(name, values)| (name, values.into_iter().map(Some))),
        )
    }

    /// Build from raw input, enforcing ingestion limits
    ///
    /// # Errors
    /// Returns [`IngestError`] if the input exceeds any limit of `config`.
    pub fn try_from_raw<I, K, V, S>(raw: I, config: &RequestConfig) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let collected = collect_raw(raw);

        let checked = config.check_count(collected.len()).and_then(|()| {
            collected
                .iter()
                .try_for_each(|(name, values)| config.check_parameter(name, values.len()))
        });
        if let Err(err) = checked {
            tracing::warn!("Rejected request input: {}", err);
            return Err(err);
        }

        Ok(Self::from_map(collected))
    }

    fn from_map(parameters: IndexMap<String, Vec<String>>) -> Self {
        tracing::trace!("Building request with {} parameters", parameters.len());
        Self::from_shared(
            parameters
                .into_iter()
                .map(|(name, values)| (name, Arc::from(values)))
                .collect(),
        )
    }

    fn from_shared(parameters: IndexMap<String, Arc<[String]>>) -> Self {
        Self {
            inner: Arc::new(RequestInner { parameters }),
        }
    }

    /// Independent copy of this request
    ///
    /// The copy holds the same names and values, but it is a distinct
    /// request: its parameters point to the copy, not to `self`.
    #[must_use]
    pub fn detach(&self) -> Self {
        Self::from_shared(
            self.inner
                .parameters
                .iter()
                .map(|(name, values)| (name.clone(), Arc::from(values.to_vec())))
                .collect(),
        )
    }

    /// Parameter names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.parameters.keys().map(String::as_str)
    }

    /// Raw values of a parameter, by full name
    #[inline]
    pub(crate) fn values(&self, name: &str) -> Option<&Arc<[String]>> {
        self.inner.parameters.get(name)
    }

    /// Raw entries, in insertion order
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &Arc<[String]>)> {
        self.inner
            .parameters
            .iter()
            .map(|(name, values)| (name.as_str(), values))
    }

    /// Eager projection onto an already parsed path
    pub(crate) fn project_path(&self, path: &ScopePath) -> Self {
        let projected: IndexMap<String, Arc<[String]>> = self
            .entries()
            .filter_map(|(name, values)| {
                path.projected_name(name)
                    .map(|local| (local.to_string(), Arc::clone(values)))
            })
            .collect();
        tracing::trace!(
            "Projected {} of {} parameters onto '{}'",
            projected.len(),
            self.inner.parameters.len(),
            path
        );
        Self::from_shared(projected)
    }
}

fn collect_raw<I, K, V, S>(raw: I) -> IndexMap<String, Vec<String>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: IntoIterator<Item = Option<S>>,
    S: Into<String>,
{
    let mut parameters: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, values) in raw {
        parameters
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(|value| value.map_or_else(String::new, Into::into)));
    }
    parameters
}

impl Request for StaticRequest {
    fn contains(&self, name: &str) -> bool {
        self.inner.parameters.contains_key(name)
    }

    fn len(&self) -> usize {
        self.inner.parameters.len()
    }

    fn parameter(&self, name: &str) -> Parameter {
        match self.values(name) {
            Some(values) => Parameter::registered(self.to_ref(), name, Arc::clone(values)),
            None => Parameter::unregistered(self.to_ref(), name),
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        let owner = self.to_ref();
        self.entries()
            .map(|(name, values)| Parameter::registered(owner.clone(), name, Arc::clone(values)))
            .collect()
    }

    fn scope(&self, prefix: &str) -> ScopedRequest {
        ScopedRequest::new(self.clone(), ScopePath::parse(prefix))
    }

    fn project(&self, prefix: &str) -> StaticRequest {
        self.project_path(&ScopePath::parse(prefix))
    }

    fn to_ref(&self) -> RequestRef {
        RequestRef::Static(self.clone())
    }
}

impl Default for StaticRequest {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for StaticRequest {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for StaticRequest {}

impl Hash for StaticRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Debug for StaticRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Owned handle to any request variant
///
/// Parameters and validation results keep one of these to point back at
/// the request they came from. Equality is identity of the root request
/// plus, for scoped views, equality of the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestRef {
    /// Root request
    Static(StaticRequest),

    /// Lazy scoped view
    Scoped(ScopedRequest),
}

impl RequestRef {
    /// Root request behind this handle
    #[inline]
    #[must_use]
    pub fn root(&self) -> &StaticRequest {
        match self {
            Self::Static(request) => request,
            Self::Scoped(scoped) => scoped.root(),
        }
    }

    /// Scope of this handle (root path for a static request)
    #[must_use]
    pub fn path(&self) -> ScopePath {
        match self {
            Self::Static(_) => ScopePath::root(),
            Self::Scoped(scoped) => scoped.path().clone(),
        }
    }

    /// Full name of a parameter local to this request
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        match self {
            Self::Static(_) => name.to_string(),
            Self::Scoped(scoped) => scoped.path().qualify(name),
        }
    }

    fn as_request(&self) -> &dyn Request {
        match self {
            Self::Static(request) => request,
            Self::Scoped(scoped) => scoped,
        }
    }
}

impl Request for RequestRef {
    fn contains(&self, name: &str) -> bool {
        self.as_request().contains(name)
    }

    fn len(&self) -> usize {
        self.as_request().len()
    }

    fn parameter(&self, name: &str) -> Parameter {
        self.as_request().parameter(name)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.as_request().parameters()
    }

    fn scope(&self, prefix: &str) -> ScopedRequest {
        self.as_request().scope(prefix)
    }

    fn project(&self, prefix: &str) -> StaticRequest {
        self.as_request().project(prefix)
    }

    fn to_ref(&self) -> RequestRef {
        self.clone()
    }
}

impl From<StaticRequest> for RequestRef {
    fn from(request: StaticRequest) -> Self {
        Self::Static(request)
    }
}

impl From<ScopedRequest> for RequestRef {
    fn from(scoped: ScopedRequest) -> Self {
        Self::Scoped(scoped)
    }
}
