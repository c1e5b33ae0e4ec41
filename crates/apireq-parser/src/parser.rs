//! Request parser trait and combinators
//!
//! Provides the [`Parser`] trait and the combinators that build structured
//! parsers out of field parsers.

use std::fmt;

use apireq_request::Request;

use crate::field::FieldParser;

/// Pure function from a request to typed output
///
/// `None` means "no output": the field is missing, every value was
/// malformed, or a nested scope is empty. Parsers never fail and never
/// mutate the request; they are stateless and shareable across threads.
///
/// Any `Fn(&dyn Request) -> Option<O> + Send + Sync` is a parser; use
/// [`from_fn`] to help closure type inference.
pub trait Parser: Send + Sync {
    /// Parsed output type
    type Output;

    /// Parse a request
    fn parse(&self, request: &dyn Request) -> Option<Self::Output>;

    /// Transform present output
    ///
    /// `mapper` is never called when this parser yields `None`.
    #[inline]
    fn map<F, N>(self, mapper: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> N + Send + Sync,
    {
        Map {
            parser: self,
            mapper,
        }
    }

    /// Transform present output with a fallible step
    #[inline]
    fn and_then<F, N>(self, mapper: F) -> AndThen<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Option<N> + Send + Sync,
    {
        AndThen {
            parser: self,
            mapper,
        }
    }

    /// Substitute `value` when this parser yields `None`
    #[inline]
    fn or_default(self, value: Self::Output) -> OrDefault<Self>
    where
        Self: Sized,
        Self::Output: Clone + Send + Sync,
    {
        OrDefault {
            parser: self,
            value,
        }
    }

    /// Substitute a computed value when this parser yields `None`
    #[inline]
    fn or_else<F>(self, fallback: F) -> OrElse<Self, F>
    where
        Self: Sized,
        F: Fn() -> Self::Output + Send + Sync,
    {
        OrElse {
            parser: self,
            fallback,
        }
    }

    /// Run two parsers against the same request and pair their results
    #[inline]
    fn zip<P>(self, other: P) -> Zip<Self, P>
    where
        Self: Sized,
        P: Parser,
    {
        Zip {
            first: self,
            second: other,
        }
    }

    /// Erase the parser type
    #[inline]
    fn boxed<'a>(self) -> BoxedParser<'a, Self::Output>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

/// Type-erased parser, for heterogeneous collections
pub type BoxedParser<'a, O> = Box<dyn Parser<Output = O> + 'a>;

impl<F, O> Parser for F
where
    F: Fn(&dyn Request) -> Option<O> + Send + Sync,
{
    type Output = O;

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<O> {
        self(request)
    }
}

impl<'a, O> Parser for Box<dyn Parser<Output = O> + 'a> {
    type Output = O;

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<O> {
        (**self).parse(request)
    }
}

/// Identity helper pinning a closure's signature to the parser shape
#[inline]
pub fn from_fn<F, O>(parser: F) -> F
where
    F: Fn(&dyn Request) -> Option<O> + Send + Sync,
{
    parser
}

/// Parse every value of one parameter
///
/// Malformed values are skipped without error. Yields `None` when no
/// value parses, including when the parameter is missing.
///
/// # Example
/// ```
/// use apireq_parser::{field, parsed, Parser};
/// use apireq_request::StaticRequest;
///
/// let request = StaticRequest::from_values([("tags", vec!["1", "bad", "3"])]);
/// assert_eq!(field("tags", parsed::<i32>()).parse(&request), Some(vec![1, 3]));
/// assert_eq!(field("other", parsed::<i32>()).parse(&request), None);
/// ```
#[inline]
#[must_use]
pub fn field<P: FieldParser>(name: impl Into<String>, parser: P) -> Field<P> {
    Field {
        name: name.into(),
        parser,
    }
}

/// Run a parser against the scoped view below `name`
///
/// # Example
/// ```
/// use apireq_parser::{field, scope, text, Parser};
/// use apireq_request::StaticRequest;
///
/// let request = StaticRequest::from_values([("user.name", vec!["ada"])]);
/// let name = scope("user", field("name", text()));
/// assert_eq!(name.parse(&request), Some(vec!["ada".to_string()]));
/// ```
#[inline]
#[must_use]
pub fn scope<P: Parser>(name: impl Into<String>, parser: P) -> Scope<P> {
    Scope {
        name: name.into(),
        parser,
    }
}

/// Run parsers in order and collect their results by position
///
/// Always yields output; absent results stay `None` in place.
#[inline]
#[must_use]
pub fn sequence<P: Parser>(parsers: impl IntoIterator<Item = P>) -> Sequence<P> {
    Sequence {
        parsers: parsers.into_iter().collect(),
    }
}

/// Run parsers in order and keep only present results
#[inline]
#[must_use]
pub fn all<P: Parser>(parsers: impl IntoIterator<Item = P>) -> All<P> {
    All {
        parsers: parsers.into_iter().collect(),
    }
}

/// Build the inner parser on each call, skipping empty requests
///
/// Yields `None` without calling `supplier` when the request has no
/// parameter, which keeps recursive parser definitions finite.
#[inline]
#[must_use]
pub fn factory<F, P>(supplier: F) -> Factory<F>
where
    F: Fn() -> P + Send + Sync,
    P: Parser,
{
    Factory { supplier }
}

/// See [`field`]
#[derive(Debug, Clone)]
pub struct Field<P> {
    name: String,
    parser: P,
}

impl<P> Field<P> {
    /// Parameter name read by this parser
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<P: FieldParser> Parser for Field<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        let parameter = request.parameter(&self.name);
        let outputs: Vec<P::Output> = parameter
            .iter()
            .filter_map(|value| self.parser.parse_field(value))
            .collect();

        let skipped = parameter.len() - outputs.len();
        if skipped > 0 {
            tracing::trace!("Skipped {} unparsable values of '{}'", skipped, parameter.path());
        }

        if outputs.is_empty() {
            None
        } else {
            Some(outputs)
        }
    }
}

/// See [`scope`]
#[derive(Debug, Clone)]
pub struct Scope<P> {
    name: String,
    parser: P,
}

impl<P: Parser> Parser for Scope<P> {
    type Output = P::Output;

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        self.parser.parse(&request.scope(&self.name))
    }
}

/// See [`Parser::map`]
#[derive(Clone)]
pub struct Map<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F, N> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> N + Send + Sync,
{
    type Output = N;

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<N> {
        self.parser.parse(request).map(&self.mapper)
    }
}

/// See [`Parser::and_then`]
#[derive(Clone)]
pub struct AndThen<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F, N> Parser for AndThen<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Option<N> + Send + Sync,
{
    type Output = N;

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<N> {
        self.parser.parse(request).and_then(&self.mapper)
    }
}

/// See [`Parser::or_default`]
#[derive(Debug, Clone)]
pub struct OrDefault<P: Parser> {
    parser: P,
    value: P::Output,
}

impl<P> Parser for OrDefault<P>
where
    P: Parser,
    P::Output: Clone + Send + Sync,
{
    type Output = P::Output;

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        Some(
            self.parser
                .parse(request)
                .unwrap_or_else(|| self.value.clone()),
        )
    }
}

/// See [`Parser::or_else`]
#[derive(Clone)]
pub struct OrElse<P, F> {
    parser: P,
    fallback: F,
}

impl<P, F> Parser for OrElse<P, F>
where
    P: Parser,
    F: Fn() -> P::Output + Send + Sync,
{
    type Output = P::Output;

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        Some(self.parser.parse(request).unwrap_or_else(&self.fallback))
    }
}

/// See [`Parser::zip`]
#[derive(Debug, Clone)]
pub struct Zip<A, B> {
    first: A,
    second: B,
}

impl<A: Parser, B: Parser> Parser for Zip<A, B> {
    type Output = (Option<A::Output>, Option<B::Output>);

    #[inline]
    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        Some((self.first.parse(request), self.second.parse(request)))
    }
}

/// See [`sequence`]
#[derive(Debug, Clone)]
pub struct Sequence<P> {
    parsers: Vec<P>,
}

impl<P> Sequence<P> {
    /// Number of parsers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Check if there is no parser
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl<P: Parser> Parser for Sequence<P> {
    type Output = Vec<Option<P::Output>>;

    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        Some(self.parsers.iter().map(|parser| parser.parse(request)).collect())
    }
}

/// See [`all`]
#[derive(Debug, Clone)]
pub struct All<P> {
    parsers: Vec<P>,
}

impl<P: Parser> Parser for All<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        Some(
            self.parsers
                .iter()
                .filter_map(|parser| parser.parse(request))
                .collect(),
        )
    }
}

/// See [`factory`]
#[derive(Clone)]
pub struct Factory<F> {
    supplier: F,
}

impl<F, P> Parser for Factory<F>
where
    F: Fn() -> P + Send + Sync,
    P: Parser,
{
    type Output = P::Output;

    fn parse(&self, request: &dyn Request) -> Option<Self::Output> {
        if request.is_empty() {
            return None;
        }
        (self.supplier)().parse(request)
    }
}

impl<P: fmt::Debug, F> fmt::Debug for Map<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("parser", &self.parser).finish_non_exhaustive()
    }
}

impl<P: fmt::Debug, F> fmt::Debug for AndThen<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndThen").field("parser", &self.parser).finish_non_exhaustive()
    }
}

impl<P: fmt::Debug, F> fmt::Debug for OrElse<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrElse").field("parser", &self.parser).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{boolean, parsed, text, Parsed};
    use apireq_request::StaticRequest;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request() -> StaticRequest {
        StaticRequest::from_values([
            ("tags", vec!["1", "bad", "3"]),
            ("page", vec!["2"]),
            ("verbose", vec![""]),
            ("user.name", vec!["ada"]),
            ("user.age", vec!["36"]),
            ("user.address.city", vec!["London"]),
        ])
    }

    #[test]
    fn field_skips_malformed_values() {
        let parser = field("tags", parsed::<i32>());
        assert_eq!(parser.parse(&request()), Some(vec![1, 3]));
        assert_eq!(parser.name(), "tags");
    }

    #[test]
    fn field_absent_when_nothing_parses() {
        let request = request();
        assert_eq!(field("missing", parsed::<i32>()).parse(&request), None);
        assert_eq!(field("user.name", parsed::<i32>()).parse(&request), None);
    }

    #[test]
    fn scope_parses_nested_request() {
        let request = request();
        let city = scope("user", scope("address", field("city", text())));
        assert_eq!(city.parse(&request), Some(vec!["London".to_string()]));

        let flat = scope("user.address", field("city", text()));
        assert_eq!(flat.parse(&request), city.parse(&request));
    }

    #[test]
    fn map_only_runs_on_present_output() {
        let calls = AtomicUsize::new(0);
        let parser = field("page", parsed::<i32>()).map(|pages| {
            calls.fetch_add(1, Ordering::SeqCst);
            pages[0]
        });
        assert_eq!(parser.parse(&request()), Some(2));

        let missing = field("missing", parsed::<i32>()).map(|pages| {
            calls.fetch_add(1, Ordering::SeqCst);
            pages[0]
        });
        assert_eq!(missing.parse(&request()), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn and_then_flattens() {
        let first = field("tags", parsed::<i32>()).and_then(|tags| tags.first().copied());
        assert_eq!(first.parse(&request()), Some(1));

        let tenth = field("tags", parsed::<i32>()).and_then(|tags| tags.get(10).copied());
        assert_eq!(tenth.parse(&request()), None);
    }

    #[test]
    fn or_default_substitutes_absence() {
        let page = field("missing", parsed::<i32>()).or_default(vec![1]);
        assert_eq!(page.parse(&request()), Some(vec![1]));

        let page = field("page", parsed::<i32>()).or_default(vec![1]);
        assert_eq!(page.parse(&request()), Some(vec![2]));
    }

    #[test]
    fn or_else_is_lazy() {
        let parser = field("page", parsed::<i32>()).or_else(|| unreachable!("not absent"));
        assert_eq!(parser.parse(&request()), Some(vec![2]));

        let parser = field("missing", parsed::<i32>()).or_else(Vec::new);
        assert_eq!(parser.parse(&request()), Some(Vec::new()));
    }

    #[test]
    fn sequence_is_positional() {
        let parser = sequence([
            field("page", parsed::<i32>()),
            field("missing", parsed::<i32>()),
            field("tags", parsed::<i32>()),
        ]);
        assert_eq!(parser.len(), 3);
        assert_eq!(
            parser.parse(&request()),
            Some(vec![Some(vec![2]), None, Some(vec![1, 3])])
        );
    }

    #[test]
    fn sequence_runs_in_order() {
        let order = std::sync::Mutex::new(Vec::new());
        let parsers: Vec<BoxedParser<'_, usize>> = (0..3)
            .map(|i| {
                let order = &order;
                from_fn(move |_: &dyn Request| {
                    order.lock().unwrap().push(i);
                    Some(i)
                })
                .boxed()
            })
            .collect();

        let result = sequence(parsers).parse(&request());
        assert_eq!(result, Some(vec![Some(0), Some(1), Some(2)]));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn all_keeps_present_outputs() {
        let parser = all([
            field("page", parsed::<i32>()),
            field("missing", parsed::<i32>()),
        ]);
        assert_eq!(parser.parse(&request()), Some(vec![vec![2]]));
        assert_eq!(all(Vec::<Field<Parsed<i32>>>::new()).parse(&request()), Some(vec![]));
    }

    #[test]
    fn zip_pairs_results() {
        let parser = field("verbose", boolean()).zip(field("missing", text()));
        assert_eq!(parser.parse(&request()), Some((Some(vec![true]), None)));
    }

    #[test]
    fn factory_skips_empty_requests() {
        let built = AtomicUsize::new(0);
        let parser = factory(|| {
            built.fetch_add(1, Ordering::SeqCst);
            field("name", text())
        });

        let request = request();
        assert_eq!(parser.parse(&request.scope("nobody")), None);
        assert_eq!(built.load(Ordering::SeqCst), 0);

        assert_eq!(parser.parse(&request.scope("user")), Some(vec!["ada".to_string()]));
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn closures_are_parsers() {
        let count = from_fn(|request: &dyn Request| Some(request.len()));
        assert_eq!(count.parse(&request()), Some(6));
        assert_eq!(count.parse(&request().scope("user")), Some(3));
    }

    #[test]
    fn boxed_parsers_mix_types() {
        let parsers: Vec<BoxedParser<'static, String>> = vec![
            field("user.name", text()).map(|names| names.join(",")).boxed(),
            field("page", parsed::<i32>())
                .map(|pages| pages[0].to_string())
                .boxed(),
        ];
        assert_eq!(
            all(parsers).parse(&request()),
            Some(vec!["ada".to_string(), "2".to_string()])
        );
    }
}
