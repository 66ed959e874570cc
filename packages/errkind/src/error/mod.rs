//! Kind-classified errors
//!
//! Provides the error half of the crate:
//! - [`Kind`] classification and the request/internal split
//! - Wrapping with cause chains and creation stacktraces
//! - Client-safe JSON rendering and status codes
//! - Chain inspection and logging helpers

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod inspect;
pub mod logging;
pub mod macros;
pub mod serialize;
pub mod stack;
pub mod status;
pub mod types;

pub use constructors::{
    new_domain, new_io, new_request, wrap, wrap_as_domain, wrap_as_io, wrap_as_request,
};
pub use extensions::{OptionExt, ResultExt};
pub use inspect::{cause, is_kind, is_timeout, root_err};
pub use logging::{call_and_log, log_error, spawn_and_log, LogLogger, Logger, TracingLogger};
pub use serialize::{SelfDescribing, REDACTED_PREFIX};
pub use stack::{StackFrame, Stacktrace, MAX_FRAMES};
pub use status::{HasStatusCode, WithStatus, BAD_REQUEST, INTERNAL_SERVER_ERROR};
pub use types::{Cause, ClassifiedError, Kind, MessageLayer, Result};
