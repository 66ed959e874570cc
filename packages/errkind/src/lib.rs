//! Kind-classified errors for services that answer clients
//!
//! This crate provides:
//! - [`ClassifiedError`], an error tagged with a [`Kind`], a cause chain and
//!   the stacktrace of its creation site
//! - Client-facing JSON that exposes request errors and redacts the rest
//! - [`ErrorBuilder`] for collecting per-field validation errors under
//!   hierarchical keys
//! - Logging sinks for errors nobody handles
//!
//! ```
//! use errkind::{ClassifiedError, Kind, ResultExt};
//!
//! let parsed: Result<u16, _> = "x80".parse::<u16>();
//! let err = parsed.wrap_as_request("bad port").unwrap_err();
//! assert_eq!(err.kind(), Kind::Request);
//! assert_eq!(err.status_code(), 400);
//!
//! let io = ClassifiedError::io("connection reset");
//! assert_eq!(io.to_json().unwrap(), r#""Internal server error: connection reset""#);
//! ```

pub mod builder;
pub mod error;
pub mod join;
pub mod sequence;

pub use builder::{Detail, ErrorBuilder, ErrorMap, KeyPutter, Putter, StubPutter};
pub use error::*;
pub use join::{join, JoinedError};
pub use sequence::{seq, PlainError, UntilFirst};
