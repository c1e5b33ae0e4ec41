//! apireq Parser Combinators
//!
//! Pure, composable parsers from a request to typed output.
//!
//! # Overview
//!
//! - **FieldParser**: one raw value to an optional typed value
//! - **Parser**: a whole request to an optional typed output
//! - **Combinators**: `field`, `scope`, `sequence`, `all`, `factory` and the
//!   `map`/`and_then`/`or_default`/`or_else`/`zip` adapters
//!
//! # Example
//!
//! ```rust
//! use apireq_parser::prelude::*;
//! use apireq_request::StaticRequest;
//!
//! #[derive(Debug, PartialEq)]
//! struct Page {
//!     number: i32,
//!     size: i32,
//! }
//!
//! let page = scope(
//!     "page",
//!     field("number", parsed::<i32>())
//!         .zip(field("size", parsed::<i32>()))
//!         .map(|(number, size)| Page {
//!             number: number.map_or(1, |n| n[0]),
//!             size: size.map_or(20, |s| s[0]),
//!         }),
//! );
//!
//! let request = StaticRequest::from_values([("page.number", vec!["3"])]);
//! assert_eq!(page.parse(&request), Some(Page { number: 3, size: 20 }));
//! ```

#![warn(missing_docs)]

pub mod field;
pub mod parser;

// Re-exports
pub use field::{boolean, non_empty, parsed, text, Boolean, FieldParser, NonEmpty, Parsed, Text};
pub use parser::{
    all, factory, field, from_fn, scope, sequence, All, AndThen, BoxedParser, Factory, Field, Map,
    OrDefault, OrElse, Parser, Scope, Sequence, Zip,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building parsers
    pub use crate::{
        all, boolean, factory, field, from_fn, non_empty, parsed, scope, sequence, text,
        BoxedParser, FieldParser, Parser,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
