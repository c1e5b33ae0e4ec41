//! Ingestion limits for raw request input

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Limits applied when building a request from client-submitted input
///
/// Requests are expected to be small. These bounds keep a hostile client
/// from making every scoped lookup scan an arbitrarily large map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Maximum number of distinct parameter names
    pub max_parameters: usize,
    /// Maximum number of values carried by one parameter
    pub max_values_per_parameter: usize,
    /// Maximum length of a parameter name, in bytes
    pub max_name_length: usize,
}

impl RequestConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration without any limit
    #[inline]
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_parameters: usize::MAX,
            max_values_per_parameter: usize::MAX,
            max_name_length: usize::MAX,
        }
    }

    /// With max parameter count
    #[inline]
    #[must_use]
    pub fn with_max_parameters(mut self, max: usize) -> Self {
        self.max_parameters = max;
        self
    }

    /// With max values per parameter
    #[inline]
    #[must_use]
    pub fn with_max_values_per_parameter(mut self, max: usize) -> Self {
        self.max_values_per_parameter = max;
        self
    }

    /// With max name length
    #[inline]
    #[must_use]
    pub fn with_max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = max;
        self
    }

    /// Check a single parameter against the per-parameter limits
    ///
    /// # Errors
    /// Returns the first limit the parameter exceeds.
    pub fn check_parameter(&self, name: &str, value_count: usize) -> Result<(), IngestError> {
        if name.len() > self.max_name_length {
            return Err(IngestError::NameTooLong {
                length: name.len(),
                max: self.max_name_length,
            });
        }
        if value_count > self.max_values_per_parameter {
            return Err(IngestError::TooManyValues {
                name: name.to_string(),
                count: value_count,
                max: self.max_values_per_parameter,
            });
        }
        Ok(())
    }

    /// Check the parameter count of a whole request
    ///
    /// # Errors
    /// Returns [`IngestError::TooManyParameters`] above the limit.
    pub fn check_count(&self, count: usize) -> Result<(), IngestError> {
        if count > self.max_parameters {
            return Err(IngestError::TooManyParameters {
                count,
                max: self.max_parameters,
            });
        }
        Ok(())
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_parameters: 1024,
            max_values_per_parameter: 256,
            max_name_length: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RequestConfig::new();
        assert_eq!(config.max_parameters, 1024);
        assert_eq!(config.max_values_per_parameter, 256);
        assert_eq!(config.max_name_length, 256);
    }

    #[test]
    fn config_builder() {
        let config = RequestConfig::new()
            .with_max_parameters(2)
            .with_max_values_per_parameter(3)
            .with_max_name_length(4);
        assert_eq!(config.max_parameters, 2);
        assert_eq!(config.max_values_per_parameter, 3);
        assert_eq!(config.max_name_length, 4);
    }

    #[test]
    fn config_check_parameter() {
        let config = RequestConfig::new()
            .with_max_values_per_parameter(2)
            .with_max_name_length(5);
        assert!(config.check_parameter("tags", 2).is_ok());
        assert!(matches!(
            config.check_parameter("tags", 3),
            Err(IngestError::TooManyValues { count: 3, max: 2, .. })
        ));
        assert!(matches!(
            config.check_parameter("too.long", 1),
            Err(IngestError::NameTooLong { length: 8, max: 5 })
        ));
    }

    #[test]
    fn config_check_count() {
        let config = RequestConfig::new().with_max_parameters(1);
        assert!(config.check_count(1).is_ok());
        assert!(config.check_count(2).is_err());
        assert!(RequestConfig::unbounded().check_count(usize::MAX).is_ok());
    }

    #[test]
    fn config_deserializes_partial() {
        let config: RequestConfig = serde_json::from_str(r#"{"max_parameters": 8}"#).unwrap();
        assert_eq!(config.max_parameters, 8);
        assert_eq!(config.max_values_per_parameter, 256);
    }
}
