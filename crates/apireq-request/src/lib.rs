//! apireq Request Model
//!
//! Flat, multi-valued API request parameters addressed as a tree through
//! dotted names.
//!
//! # Overview
//!
//! - **Parameter**: named, ordered sequence of string values
//! - **StaticRequest**: immutable name → parameter map built from raw input
//! - **ScopedRequest**: zero-copy view of the parameters below a prefix
//! - **RequestRef**: owned handle over either variant
//!
//! # Example
//!
//! ```rust
//! use apireq_request::{Request, StaticRequest};
//!
//! let request = StaticRequest::from_values([
//!     ("page", vec!["2"]),
//!     ("filter.status", vec!["open", "closed"]),
//! ]);
//!
//! let filter = request.scope("filter");
//! assert_eq!(filter.parameter("status").len(), 2);
//! assert_eq!(request.parameter("page").as_integer(0), Ok(Some(2)));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod parameter;
pub mod path;
pub mod request;
pub mod scoped;

// Re-exports
pub use config::RequestConfig;
pub use error::{CoercionError, IngestError};
pub use parameter::{is_truthy, Parameter};
pub use path::{ScopePath, SEPARATOR};
pub use request::{Request, RequestRef, StaticRequest};
pub use scoped::ScopedRequest;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for request handling
    pub use crate::{
        Parameter, Request, RequestConfig, RequestRef, ScopePath, ScopedRequest, StaticRequest,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
