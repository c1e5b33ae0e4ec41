//! Scope paths for addressing nested parameters
//!
//! Provides [`ScopePath`], the dotted prefix that turns a flat parameter map
//! into a tree of nested scopes.

use std::fmt::{self, Display, Formatter};

/// Separator between the segments of a parameter name
pub const SEPARATOR: char = '.';

/// Dotted prefix of a scoped request
///
/// A parameter named `user.address.city` lives in the scope `user.address`
/// under the local name `city`. Matching is done segment by segment, so the
/// scope `user` never captures `username`.
///
/// # Examples
/// - `["user"]` qualifies `name` as `user.name`
/// - `["user", "address"]` qualifies `city` as `user.address.city`
/// - the root path qualifies `name` as `name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ScopePath(Vec<String>);

impl ScopePath {
    /// Root path (no prefix)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dotted prefix into a path
    ///
    /// Every separator starts a new segment, including leading, trailing
    /// and repeated ones, so `"a..b"` has three segments and `""` has one
    /// empty segment.
    #[must_use]
    pub fn parse(prefix: &str) -> Self {
        Self(prefix.split(SEPARATOR).map(str::to_string).collect())
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this is the root path
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Append a dotted prefix, returning the nested path
    ///
    /// `ScopePath::parse("a").child("b.c") == ScopePath::parse("a.b.c")`.
    #[must_use]
    pub fn child(&self, prefix: &str) -> Self {
        let mut nested = self.clone();
        nested.0.extend(prefix.split(SEPARATOR).map(str::to_string));
        nested
    }

    /// Check if this path is a prefix of another
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }

    /// Full parameter name of a local name in this scope
    #[must_use]
    pub fn qualify(&self, local: &str) -> String {
        if self.is_root() {
            return local.to_string();
        }
        let mut name = self.to_string();
        name.push(SEPARATOR);
        name.push_str(local);
        name
    }

    /// Local name of a parameter that lives strictly below this scope
    ///
    /// Returns `None` when `name` does not start with this prefix followed
    /// by the separator.
    #[must_use]
    pub fn local_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        if self.is_root() {
            return Some(name);
        }
        let rest = self.strip(name)?;
        rest.strip_prefix(SEPARATOR)
    }

    /// Local name used by eager projection
    ///
    /// Same as [`Self::local_name`], except that a parameter named exactly
    /// like the scope maps to the empty local name.
    #[must_use]
    pub fn projected_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        if self.is_root() {
            return Some(name);
        }
        let rest = self.strip(name)?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix(SEPARATOR)
        }
    }

    /// Strip the segments of this path from the start of `name`
    fn strip<'a>(&self, name: &'a str) -> Option<&'a str> {
        let mut rest = name;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                rest = rest.strip_prefix(SEPARATOR)?;
            }
            rest = rest.strip_prefix(segment.as_str())?;
        }
        Some(rest)
    }

    /// Iterator over segments from outermost to innermost
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for ScopePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for ScopePath {
    fn from(prefix: &str) -> Self {
        Self::parse(prefix)
    }
}

impl From<Vec<String>> for ScopePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parse_segments() {
        let path = ScopePath::parse("a.b.c");
        assert_eq!(path.segments(), &["a", "b", "c"]);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn path_parse_empty_has_one_segment() {
        let path = ScopePath::parse("");
        assert_eq!(path.segments(), &[""]);
        assert!(!path.is_root());
    }

    #[test]
    fn path_root() {
        let path = ScopePath::root();
        assert!(path.is_root());
        assert_eq!(path.to_string(), "");
        assert_eq!(path.qualify("name"), "name");
    }

    #[test]
    fn path_child_concatenates() {
        let nested = ScopePath::parse("a").child("b.c");
        assert_eq!(nested, ScopePath::parse("a.b.c"));
    }

    #[test]
    fn path_parent_and_last() {
        let path = ScopePath::parse("user.address");
        assert_eq!(path.last(), Some("address"));
        assert_eq!(path.parent().unwrap(), ScopePath::parse("user"));
        assert!(ScopePath::root().parent().is_none());
    }

    #[test]
    fn path_qualify() {
        let path = ScopePath::parse("user.address");
        assert_eq!(path.qualify("city"), "user.address.city");
        assert_eq!(path.qualify(""), "user.address.");
    }

    #[test]
    fn path_local_name_is_component_wise() {
        let path = ScopePath::parse("a");
        assert_eq!(path.local_name("a.b"), Some("b"));
        assert_eq!(path.local_name("a.b.c"), Some("b.c"));
        assert_eq!(path.local_name("ab"), None);
        assert_eq!(path.local_name("a"), None);
        assert_eq!(path.local_name("b.a"), None);
    }

    #[test]
    fn path_projected_name_includes_exact_match() {
        let path = ScopePath::parse("a");
        assert_eq!(path.projected_name("a"), Some(""));
        assert_eq!(path.projected_name("a.b"), Some("b"));
        assert_eq!(path.projected_name("ab"), None);
    }

    #[test]
    fn path_nested_local_name() {
        let path = ScopePath::parse("a.b");
        assert_eq!(path.local_name("a.b.c"), Some("c"));
        assert_eq!(path.local_name("a.bc"), None);
        assert_eq!(path.local_name("a.b"), None);
    }

    #[test]
    fn path_is_prefix_of() {
        let a = ScopePath::parse("a.b");
        let b = ScopePath::parse("a.b.c");
        assert!(a.is_prefix_of(&b));
        assert!(!b.is_prefix_of(&a));
        assert!(ScopePath::root().is_prefix_of(&a));
    }

    #[test]
    fn path_display_round_trips() {
        let path = ScopePath::parse("a..b");
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "a..b");
    }
}
