//! apireq Validator Combinators
//!
//! Composable request validators that accumulate structured errors instead
//! of failing fast.
//!
//! # Overview
//!
//! - **FieldValidator**: checks one raw value, reports messages
//! - **Validator**: checks a whole request, returns a [`Validation`]
//! - **Validation**: immutable set of [`ValidationError`]s; combining is set
//!   union, so composition is associative and order-independent
//!
//! # Example
//!
//! ```rust
//! use apireq_request::StaticRequest;
//! use apireq_validator::prelude::*;
//!
//! let validator = all([
//!     required("q").boxed(),
//!     scope("page", field("size", parses_as::<u32>("must be a number"))).boxed(),
//! ]);
//!
//! let request = StaticRequest::from_values([("page.size", vec!["ten"])]);
//! let validation = validator.validate(&request);
//!
//! assert_eq!(validation.len(), 2);
//! assert!(validation.assert_valid().is_err());
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod field;
pub mod validation;
pub mod validator;

// Re-exports
pub use error::{ErrorReport, InvalidRequest, ValidationError, ValueIndexOutOfRange};
pub use field::{max_length, non_blank, one_of, parses_as, FieldValidation, FieldValidator};
pub use validation::Validation;
pub use validator::{
    all, field, from_fn, required, required_with, scope, All, BoxedValidator, CompoundValidator,
    Field, Required, Scope, Validator,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building validators
    pub use crate::{
        all, field, from_fn, max_length, non_blank, one_of, parses_as, required, required_with,
        scope, BoxedValidator, CompoundValidator, FieldValidation, FieldValidator, Validation,
        ValidationError, Validator,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
