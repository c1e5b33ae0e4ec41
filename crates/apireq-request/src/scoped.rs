//! Lazy scoped views
//!
//! Provides [`ScopedRequest`], a zero-copy view of the parameters of a
//! request that live below a dotted prefix.

use std::sync::Arc;

use crate::parameter::Parameter;
use crate::path::ScopePath;
use crate::request::{Request, RequestRef, StaticRequest};

/// View of the parameters below a prefix, re-keyed to local names
///
/// Holds the root request and the full prefix; every query filters the
/// root on demand. Nesting a view appends to the prefix instead of
/// wrapping the view, so `scope("a").scope("b") == scope("a.b")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedRequest {
    root: StaticRequest,
    path: ScopePath,
}

impl ScopedRequest {
    /// Create a view of `root` below `path`
    #[inline]
    #[must_use]
    pub fn new(root: StaticRequest, path: ScopePath) -> Self {
        Self { root, path }
    }

    /// Root request
    #[inline]
    #[must_use]
    pub fn root(&self) -> &StaticRequest {
        &self.root
    }

    /// Full prefix of this view
    #[inline]
    #[must_use]
    pub fn path(&self) -> &ScopePath {
        &self.path
    }

    /// Full prefix, as a dotted string
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> String {
        self.path.to_string()
    }

    fn local_entries(&self) -> impl Iterator<Item = (&str, &Arc<[String]>)> {
        self.root
            .entries()
            .filter_map(move |(name, values)| self.path.local_name(name).map(|local| (local, values)))
    }
}

impl Request for ScopedRequest {
    fn contains(&self, name: &str) -> bool {
        self.root.contains(&self.path.qualify(name))
    }

    fn len(&self) -> usize {
        self.local_entries().count()
    }

    fn parameter(&self, name: &str) -> Parameter {
        match self.root.values(&self.path.qualify(name)) {
            Some(values) => Parameter::registered(self.to_ref(), name, Arc::clone(values)),
            None => Parameter::unregistered(self.to_ref(), name),
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        let owner = self.to_ref();
        self.local_entries()
            .map(|(local, values)| Parameter::registered(owner.clone(), local, Arc::clone(values)))
            .collect()
    }

    fn scope(&self, prefix: &str) -> ScopedRequest {
        Self::new(self.root.clone(), self.path.child(prefix))
    }

    fn project(&self, prefix: &str) -> StaticRequest {
        self.root.project_path(&self.path.child(prefix))
    }

    fn to_ref(&self) -> RequestRef {
        RequestRef::Scoped(self.clone())
    }
}
