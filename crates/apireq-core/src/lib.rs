//! apireq Core - Request parsing and validation
//!
//! Facade over the workspace:
//! - [`request`]: parameters, requests and scoped views
//! - [`parser`]: parser combinators
//! - [`validator`]: validator combinators and validation results
//! - [`RequestHandler`]: validate, then parse, in one call
//!
//! Parser and validator combinators share names (`field`, `scope`, `all`,
//! `from_fn`); reach them through their module.
//!
//! # Example
//!
//! ```rust
//! use apireq_core::prelude::*;
//!
//! let request = StaticRequest::from_values([
//!     ("user.name", vec!["ada"]),
//!     ("user.age", vec!["thirty"]),
//! ]);
//!
//! let check = validator::scope(
//!     "user",
//!     validator::all([
//!         required("name").boxed(),
//!         validator::field("age", parses_as::<u8>("age must be a number")).boxed(),
//!     ]),
//! );
//! let report = check.validate(&request).report();
//! assert_eq!(report[0].parameter.as_deref(), Some("user.age"));
//!
//! let name = parser::scope("user", parser::field("name", text()));
//! assert_eq!(name.parse(&request), Some(vec!["ada".to_string()]));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod handler;

pub use apireq_parser as parser;
pub use apireq_request as request;
pub use apireq_validator as validator;

// Re-exports for convenience
pub use error::HandlerError;
pub use handler::RequestHandler;

pub use apireq_parser::{BoxedParser, FieldParser, Parser};
pub use apireq_request::{
    CoercionError, IngestError, Parameter, Request, RequestConfig, RequestRef, ScopePath,
    ScopedRequest, StaticRequest,
};
pub use apireq_validator::{
    BoxedValidator, CompoundValidator, ErrorReport, FieldValidation, FieldValidator,
    InvalidRequest, Validation, ValidationError, Validator,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for handling API requests
    pub use crate::{
        parser, validator, CompoundValidator, ErrorReport, FieldParser, FieldValidation,
        FieldValidator, HandlerError, Parameter, Parser, Request, RequestConfig, RequestHandler,
        StaticRequest, Validation, ValidationError, Validator,
    };
    pub use apireq_parser::{boolean, non_empty, parsed, text};
    pub use apireq_validator::{max_length, non_blank, one_of, parses_as, required, required_with};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
