//! Error constructors and methods
//!
//! Every public constructor is `#[inline(never)]` and forwards a frame count
//! to [`Stacktrace::capture`], so the first captured frame is always the
//! code that called into this crate. The `*_at` variants let helper
//! functions built on top of this crate hide their own frames too.

use std::error::Error as StdError;
use std::panic::Location;
use std::sync::Arc;

use super::stack::Stacktrace;
use super::types::{Cause, ClassifiedError, ErrorInner, Kind, MessageLayer, Shape};
use crate::builder::{Detail, ErrorMap};

impl ClassifiedError {
    #[track_caller]
    #[inline(never)]
    fn build(
        kind: Kind,
        message: String,
        cause: Option<Cause>,
        shape: Shape,
        details: ErrorMap,
        skip: usize,
    ) -> Self {
        let stacktrace = Stacktrace::capture(skip + 1, Location::caller());
        Self {
            inner: Arc::new(ErrorInner {
                kind,
                message,
                cause,
                details,
                shape,
                stacktrace: Arc::new(stacktrace),
            }),
        }
    }

    /// Create a new error of the given kind, without a cause
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self::build(kind, message.into(), None, Shape::Layered, ErrorMap::new(), 1)
    }

    /// Like [`ClassifiedError::new`], additionally hiding `skip` frames of the
    /// calling helper from the stacktrace
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn new_at(kind: Kind, message: impl Into<String>, skip: usize) -> Self {
        Self::build(
            kind,
            message.into(),
            None,
            Shape::Layered,
            ErrorMap::new(),
            skip + 1,
        )
    }

    /// Wrap `err` as the cause of a new error of the given kind.
    ///
    /// When `err` is already a [`ClassifiedError`] of the same kind no new
    /// layer is created; the message is pushed down with
    /// [`ClassifiedError::with_msg`] instead.
    #[track_caller]
    #[inline(never)]
    pub fn wrap<E>(err: E, kind: Kind, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::wrap_cause_at(Cause::from_error(err), kind, message, 1)
    }

    /// Like [`ClassifiedError::wrap`], additionally hiding `skip` frames
    #[track_caller]
    #[inline(never)]
    pub fn wrap_at<E>(err: E, kind: Kind, message: impl Into<String>, skip: usize) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::wrap_cause_at(Cause::from_error(err), kind, message, skip + 1)
    }

    /// Wrap an already classified [`Cause`]
    #[track_caller]
    #[inline(never)]
    pub fn wrap_cause(cause: Cause, kind: Kind, message: impl Into<String>) -> Self {
        Self::wrap_cause_at(cause, kind, message, 1)
    }

    /// Like [`ClassifiedError::wrap_cause`], additionally hiding `skip` frames
    #[track_caller]
    #[inline(never)]
    pub fn wrap_cause_at(
        cause: Cause,
        kind: Kind,
        message: impl Into<String>,
        skip: usize,
    ) -> Self {
        match cause {
            Cause::Classified(err) if err.kind() == kind => err.with_msg(message),
            cause => Self::build(
                kind,
                message.into(),
                Some(cause),
                Shape::Layered,
                ErrorMap::new(),
                skip + 1,
            ),
        }
    }

    /// Build a request error whose client-facing body is `details`.
    ///
    /// An empty `message` serializes as the bare details map.
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn from_details(details: ErrorMap, message: impl Into<String>) -> Self {
        Self::build(
            Kind::Request,
            message.into(),
            None,
            Shape::Aggregate,
            details,
            1,
        )
    }

    /// Like [`ClassifiedError::from_details`], additionally hiding `skip` frames
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn from_details_at(details: ErrorMap, message: impl Into<String>, skip: usize) -> Self {
        Self::build(
            Kind::Request,
            message.into(),
            None,
            Shape::Aggregate,
            details,
            skip + 1,
        )
    }

    /// Request error carrying a single detail: `key` names the offending
    /// input and `detail` explains what is wrong with it
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn request_details(
        key: impl Into<String>,
        detail: impl Into<Detail>,
        message: impl Into<String>,
    ) -> Self {
        let mut details = ErrorMap::new();
        details.insert(key, detail);
        Self::build(
            Kind::Request,
            message.into(),
            None,
            Shape::Aggregate,
            details,
            1,
        )
    }

    /// Re-annotate this error with a new message, keeping its kind and
    /// stacktrace.
    ///
    /// The previous message and cause move down into a [`MessageLayer`].
    /// Aggregate errors keep their details and fold the old message into the
    /// new one instead.
    #[must_use]
    pub fn with_msg(&self, message: impl Into<String>) -> Self {
        let message = message.into();
        let inner = &self.inner;
        let (message, cause) = match inner.shape {
            Shape::Aggregate if inner.message.is_empty() => (message, None),
            Shape::Aggregate => (format!("{message} [{}]", inner.message), None),
            Shape::Layered => {
                let layer = MessageLayer {
                    message: inner.message.clone(),
                    cause: inner.cause.clone().map(Box::new),
                };
                (message, Some(Cause::Message(layer)))
            }
        };
        Self {
            inner: Arc::new(ErrorInner {
                kind: inner.kind,
                message,
                cause,
                details: inner.details.clone(),
                shape: inner.shape,
                stacktrace: Arc::clone(&inner.stacktrace),
            }),
        }
    }

    /// Attach a detail under `key`, replacing any previous value there
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Detail>) {
        Arc::make_mut(&mut self.inner).details.insert(key, value);
    }

    /// Create a request error
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::new_at(Kind::Request, message, 1)
    }

    /// Create a domain error
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::new_at(Kind::Domain, message, 1)
    }

    /// Create an I/O error
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new_at(Kind::Io, message, 1)
    }

    /// Get the error kind
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Message added at this layer
    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// Direct cause, if any
    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        self.inner.cause.as_ref()
    }

    /// Keyed details attached with [`ClassifiedError::add`] or collected by an
    /// [`ErrorBuilder`](crate::ErrorBuilder)
    #[must_use]
    pub fn details(&self) -> &ErrorMap {
        &self.inner.details
    }

    /// Stacktrace of the creation site
    #[must_use]
    pub fn stacktrace(&self) -> &Stacktrace {
        &self.inner.stacktrace
    }

    /// See [`Kind::is_request`]
    #[must_use]
    pub fn is_request(&self) -> bool {
        self.inner.kind.is_request()
    }

    /// Returns `true` for errors produced from a details map
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        self.inner.shape == Shape::Aggregate
    }
}

/// Create a request error
#[track_caller]
#[inline(never)]
#[must_use]
pub fn new_request(message: impl Into<String>) -> ClassifiedError {
    ClassifiedError::new_at(Kind::Request, message, 1)
}

/// Create a domain error
#[track_caller]
#[inline(never)]
#[must_use]
pub fn new_domain(message: impl Into<String>) -> ClassifiedError {
    ClassifiedError::new_at(Kind::Domain, message, 1)
}

/// Create an I/O error
#[track_caller]
#[inline(never)]
#[must_use]
pub fn new_io(message: impl Into<String>) -> ClassifiedError {
    ClassifiedError::new_at(Kind::Io, message, 1)
}

#[track_caller]
#[inline(never)]
fn wrap_option<E>(err: Option<E>, kind: Kind, message: String, skip: usize) -> Option<ClassifiedError>
where
    E: StdError + Send + Sync + 'static,
{
    match err {
        Some(err) => Some(ClassifiedError::wrap_cause_at(
            Cause::from_error(err),
            kind,
            message,
            skip + 1,
        )),
        None => None,
    }
}

/// Wrap a possibly absent error; `None` stays `None`
#[track_caller]
#[inline(never)]
pub fn wrap<E>(err: Option<E>, kind: Kind, message: impl Into<String>) -> Option<ClassifiedError>
where
    E: StdError + Send + Sync + 'static,
{
    wrap_option(err, kind, message.into(), 1)
}

/// Wrap a possibly absent error as a request error; `None` stays `None`
#[track_caller]
#[inline(never)]
pub fn wrap_as_request<E>(err: Option<E>, message: impl Into<String>) -> Option<ClassifiedError>
where
    E: StdError + Send + Sync + 'static,
{
    wrap_option(err, Kind::Request, message.into(), 1)
}

/// Wrap a possibly absent error as a domain error; `None` stays `None`
#[track_caller]
#[inline(never)]
pub fn wrap_as_domain<E>(err: Option<E>, message: impl Into<String>) -> Option<ClassifiedError>
where
    E: StdError + Send + Sync + 'static,
{
    wrap_option(err, Kind::Domain, message.into(), 1)
}

/// Wrap a possibly absent error as an I/O error; `None` stays `None`
#[track_caller]
#[inline(never)]
pub fn wrap_as_io<E>(err: Option<E>, message: impl Into<String>) -> Option<ClassifiedError>
where
    E: StdError + Send + Sync + 'static,
{
    wrap_option(err, Kind::Io, message.into(), 1)
}
