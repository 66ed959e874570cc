//! Extension traits for `Result` and `Option`

use std::error::Error as StdError;

use super::types::{ClassifiedError, Kind};

#[track_caller]
#[inline(never)]
fn wrap_result<T, E>(
    result: Result<T, E>,
    kind: Kind,
    message: String,
    skip: usize,
) -> Result<T, ClassifiedError>
where
    E: StdError + Send + Sync + 'static,
{
    match result {
        Ok(value) => Ok(value),
        Err(err) => Err(ClassifiedError::wrap_at(err, kind, message, skip + 1)),
    }
}

/// Classify the error side of a `Result`
pub trait ResultExt<T> {
    /// Wrap the error as `kind` with `message`
    fn wrap_as(self, kind: Kind, message: impl Into<String>) -> Result<T, ClassifiedError>;

    /// Wrap the error as `kind`, building the message only on failure
    fn wrap_as_with<M, F>(self, kind: Kind, message: F) -> Result<T, ClassifiedError>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Wrap the error as a request error
    fn wrap_as_request(self, message: impl Into<String>) -> Result<T, ClassifiedError>;

    /// Wrap the error as a domain error
    fn wrap_as_domain(self, message: impl Into<String>) -> Result<T, ClassifiedError>;

    /// Wrap the error as an I/O error
    fn wrap_as_io(self, message: impl Into<String>) -> Result<T, ClassifiedError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[track_caller]
    #[inline(never)]
    fn wrap_as(self, kind: Kind, message: impl Into<String>) -> Result<T, ClassifiedError> {
        wrap_result(self, kind, message.into(), 1)
    }

    #[track_caller]
    #[inline(never)]
    fn wrap_as_with<M, F>(self, kind: Kind, message: F) -> Result<T, ClassifiedError>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(ClassifiedError::wrap_at(err, kind, message(), 1)),
        }
    }

    #[track_caller]
    #[inline(never)]
    fn wrap_as_request(self, message: impl Into<String>) -> Result<T, ClassifiedError> {
        wrap_result(self, Kind::Request, message.into(), 1)
    }

    #[track_caller]
    #[inline(never)]
    fn wrap_as_domain(self, message: impl Into<String>) -> Result<T, ClassifiedError> {
        wrap_result(self, Kind::Domain, message.into(), 1)
    }

    #[track_caller]
    #[inline(never)]
    fn wrap_as_io(self, message: impl Into<String>) -> Result<T, ClassifiedError> {
        wrap_result(self, Kind::Io, message.into(), 1)
    }
}

/// Turn a missing value into a classified error
pub trait OptionExt<T> {
    /// `None` becomes a new error of `kind` with `message`
    fn ok_or_kind(self, kind: Kind, message: impl Into<String>) -> Result<T, ClassifiedError>;
}

impl<T> OptionExt<T> for Option<T> {
    #[track_caller]
    #[inline(never)]
    fn ok_or_kind(self, kind: Kind, message: impl Into<String>) -> Result<T, ClassifiedError> {
        match self {
            Some(value) => Ok(value),
            None => Err(ClassifiedError::new_at(kind, message, 1)),
        }
    }
}
