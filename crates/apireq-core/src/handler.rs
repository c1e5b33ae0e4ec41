//! Validate-then-parse pipeline

use apireq_parser::Parser;
use apireq_request::{Request, RequestConfig, StaticRequest};
use apireq_validator::{CompoundValidator, Validator};

use crate::error::HandlerError;

/// Runs validators, then a parser, against incoming requests
///
/// The parser only runs when every validator passes. Handlers are
/// stateless between calls and can be shared across threads.
///
/// # Example
/// ```
/// use apireq_core::prelude::*;
///
/// let id = parser::field("id", parsed::<u64>()).and_then(|ids| ids.first().copied());
/// let handler = RequestHandler::new(id)
///     .with_validator(required("id"))
///     .with_validator(validator::field("id", parses_as::<u64>("id must be a number")));
///
/// let id = handler.handle_raw([("id", vec![Some("7")])]);
/// assert_eq!(id.ok(), Some(7));
///
/// let failure = handler.handle_raw([("id", vec![Some("seven")])]).unwrap_err();
/// assert!(failure.is_invalid());
/// ```
#[derive(Debug)]
pub struct RequestHandler<P> {
    parser: P,
    validator: CompoundValidator,
    config: RequestConfig,
}

impl<P: Parser> RequestHandler<P> {
    /// Create a handler with no validator and default limits
    #[must_use]
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            validator: CompoundValidator::new(),
            config: RequestConfig::default(),
        }
    }

    /// Builder: add a validator
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = self.validator.with_validator(validator);
        self
    }

    /// Builder: set ingestion limits for [`RequestHandler::handle_raw`]
    #[must_use]
    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }

    /// Ingestion limits
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Number of validators
    #[inline]
    #[must_use]
    pub fn validator_count(&self) -> usize {
        self.validator.len()
    }

    /// Validate and parse a request
    ///
    /// # Errors
    /// - [`HandlerError::Invalid`] if any validator reports an error
    /// - [`HandlerError::Incomplete`] if the parser yields no output
    pub fn handle(&self, request: &dyn Request) -> Result<P::Output, HandlerError> {
        self.validator.validate(request).assert_valid()?;

        match self.parser.parse(request) {
            Some(output) => {
                tracing::debug!("Handled request with {} parameters", request.len());
                Ok(output)
            }
            None => {
                tracing::debug!("Parser produced no output for valid request");
                Err(HandlerError::Incomplete)
            }
        }
    }

    /// Build a request from raw input under the configured limits, then
    /// handle it
    ///
    /// # Errors
    /// - [`HandlerError::Rejected`] if the input exceeds the limits
    /// - otherwise as [`RequestHandler::handle`]
    pub fn handle_raw<I, K, V, S>(&self, raw: I) -> Result<P::Output, HandlerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let request = StaticRequest::try_from_raw(raw, &self.config)?;
        self.handle(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apireq_parser::{field, parsed, text};
    use apireq_request::IngestError;
    use apireq_validator::required;

    fn handler() -> RequestHandler<impl Parser<Output = Vec<String>>> {
        RequestHandler::new(field("name", text())).with_validator(required("name"))
    }

    #[test]
    fn handle_returns_parsed_output() {
        let request = StaticRequest::from_values([("name", vec!["ada"])]);
        assert_eq!(handler().handle(&request).ok(), Some(vec!["ada".to_string()]));
    }

    #[test]
    fn handle_stops_at_validation() {
        let error = handler().handle(&StaticRequest::empty()).unwrap_err();
        assert!(error.is_invalid());
        assert_eq!(error.report()[0].parameter.as_deref(), Some("name"));
    }

    #[test]
    fn handle_reports_incomplete_output() {
        let handler = RequestHandler::new(field("n", parsed::<i32>()));
        let request = StaticRequest::from_values([("n", vec!["x"])]);
        assert!(matches!(handler.handle(&request), Err(HandlerError::Incomplete)));
    }

    #[test]
    fn handle_raw_enforces_config() {
        let handler = handler().with_config(RequestConfig::new().with_max_parameters(1));
        let result = handler.handle_raw([("name", vec![Some("a")]), ("x", vec![None])]);

        assert!(matches!(
            result,
            Err(HandlerError::Rejected(IngestError::TooManyParameters { count: 2, max: 1 }))
        ));
        assert_eq!(handler.config().max_parameters, 1);
        assert_eq!(handler.validator_count(), 1);
    }
}
