//! HTTP-style status codes for errors

use std::error::Error as StdError;
use std::fmt;

use super::types::{Cause, ClassifiedError};

/// Status for request-kind errors
pub const BAD_REQUEST: u16 = 400;
/// Status for every other kind
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Errors that declare the status code a response layer should use
pub trait HasStatusCode {
    /// The status code for this error
    fn status_code(&self) -> u16;
}

impl ClassifiedError {
    /// Status code for this error.
    ///
    /// A direct cause that declares its own status wins; otherwise request
    /// kinds map to 400 and everything else to 500.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        if let Some(status) = self.cause().and_then(Cause::status_code) {
            return status;
        }
        if self.is_request() {
            BAD_REQUEST
        } else {
            INTERNAL_SERVER_ERROR
        }
    }
}

impl HasStatusCode for ClassifiedError {
    fn status_code(&self) -> u16 {
        ClassifiedError::status_code(self)
    }
}

impl Cause {
    /// Status declared by the cause itself, if it declares one
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Cause::Classified(err) => Some(err.status_code()),
            Cause::Message(_) => None,
            Cause::Opaque(err) => err
                .downcast_ref::<WithStatus>()
                .map(HasStatusCode::status_code),
        }
    }
}

/// Attaches a status code to a foreign error, so that errors wrapping it
/// report that status instead of the kind default.
pub struct WithStatus {
    status: u16,
    error: Box<dyn StdError + Send + Sync>,
}

impl WithStatus {
    /// Wrap `error` with `status`
    pub fn new<E>(status: u16, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            status,
            error: Box::new(error),
        }
    }

    /// The wrapped error
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.error.as_ref()
    }
}

impl HasStatusCode for WithStatus {
    fn status_code(&self) -> u16 {
        self.status
    }
}

impl fmt::Display for WithStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl fmt::Debug for WithStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithStatus")
            .field("status", &self.status)
            .field("error", &self.error)
            .finish()
    }
}

impl StdError for WithStatus {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.error.source()
    }
}
