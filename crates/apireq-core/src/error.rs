//! Error types for the request pipeline

use apireq_request::IngestError;
use apireq_validator::{ErrorReport, InvalidRequest};

/// Failure of [`RequestHandler`](crate::RequestHandler)
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Raw input exceeded the configured limits
    #[error("request rejected: {0}")]
    Rejected(#[from] IngestError),

    /// Request failed validation
    #[error("{0}")]
    Invalid(#[from] InvalidRequest),

    /// Request was valid but the parser produced no output
    #[error("request produced no output")]
    Incomplete,
}

impl HandlerError {
    /// Check if the request failed validation
    #[inline]
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Serializable view of the failure
    ///
    /// Validation failures report each error. Other failures report a single
    /// request-level entry.
    #[must_use]
    pub fn report(&self) -> Vec<ErrorReport> {
        match self {
            Self::Invalid(invalid) => invalid.report(),
            Self::Rejected(_) | Self::Incomplete => vec![ErrorReport {
                description: self.to_string(),
                parameter: None,
                index: None,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_reports_single_entry() {
        let error = HandlerError::from(IngestError::TooManyParameters { count: 3, max: 2 });
        let report = error.report();

        assert!(!error.is_invalid());
        assert_eq!(report.len(), 1);
        assert!(report[0].description.starts_with("request rejected"));
        assert_eq!(report[0].parameter, None);
    }

    #[test]
    fn incomplete_display() {
        assert_eq!(HandlerError::Incomplete.to_string(), "request produced no output");
    }
}
