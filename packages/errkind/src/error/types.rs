//! Core error types and definitions

use std::error::Error as StdError;
use std::io;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::stack::Stacktrace;
use crate::builder::ErrorMap;

/// Semantic classification of an error.
///
/// The kind decides how an error is serialized for clients and which status
/// code it maps to. See [`Kind::is_request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Unclassified error. Transparent for [`is_kind`](crate::is_kind).
    #[error("other error")]
    Other,

    /// Invalid operation for this type of item
    #[error("invalid operation")]
    Invalid,

    /// Permission denied
    #[error("permission denied")]
    Permission,

    /// External I/O error such as a network failure
    #[error("I/O error")]
    Io,

    /// Item already exists
    #[error("item already exists")]
    Exist,

    /// Item does not exist
    #[error("item does not exist")]
    NotExist,

    /// Item is a directory
    #[error("item is a directory")]
    IsDir,

    /// Item is not a directory
    #[error("item is not a directory")]
    NotDir,

    /// Directory not empty
    #[error("directory not empty")]
    NotEmpty,

    /// Information withheld
    #[error("information withheld")]
    Private,

    /// No wrapped key for user with read access
    #[error("cannot decrypt")]
    CannotDecrypt,

    /// A transient error; retrying may succeed
    #[error("transient error")]
    Transient,

    /// Link target does not exist
    #[error("link target does not exist")]
    BrokenLink,

    /// Invalid client request
    #[error("request error")]
    Request,

    /// Internal model reached an impossible state
    #[error("domain error")]
    Domain,
}

impl Kind {
    /// Returns `true` for kinds whose message and details are safe to show to
    /// the client that caused them.
    #[must_use]
    pub const fn is_request(self) -> bool {
        matches!(
            self,
            Kind::Permission
                | Kind::Exist
                | Kind::NotExist
                | Kind::Private
                | Kind::CannotDecrypt
                | Kind::Request
        )
    }
}

impl From<io::ErrorKind> for Kind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Kind::NotExist,
            io::ErrorKind::PermissionDenied => Kind::Permission,
            io::ErrorKind::AlreadyExists => Kind::Exist,
            io::ErrorKind::TimedOut | io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => {
                Kind::Transient
            }
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => Kind::Invalid,
            _ => Kind::Io,
        }
    }
}

/// An error tagged with a [`Kind`], a message, an optional cause and the
/// stacktrace of its creation site.
///
/// Cloning is cheap; the payload is shared. Values are immutable except for
/// [`ClassifiedError::add`], which copies the payload on write.
#[derive(Clone)]
pub struct ClassifiedError {
    pub(super) inner: Arc<ErrorInner>,
}

#[derive(Clone)]
pub(super) struct ErrorInner {
    pub kind: Kind,
    pub message: String,
    pub cause: Option<Cause>,
    pub details: ErrorMap,
    pub shape: Shape,
    /// Shared by message-only rewraps of the same error
    pub stacktrace: Arc<Stacktrace>,
}

/// How the error renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    /// Message plus optional cause
    Layered,
    /// Message plus keyed details collected by a builder
    Aggregate,
}

/// The direct cause of a [`ClassifiedError`].
#[derive(Debug, Clone)]
pub enum Cause {
    /// Another classified error, with its own kind and stacktrace
    Classified(ClassifiedError),
    /// A message pushed down by a same-kind rewrap
    Message(MessageLayer),
    /// Any other error
    Opaque(Arc<dyn StdError + Send + Sync>),
}

/// Lightweight cause node holding only a message and the cause it annotated.
///
/// Produced when an error is re-annotated without changing its kind; carries
/// no stacktrace of its own.
#[derive(Debug, Clone)]
pub struct MessageLayer {
    pub(super) message: String,
    pub(super) cause: Option<Box<Cause>>,
}

impl MessageLayer {
    /// The message this layer holds
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The cause the message was attached to
    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_deref()
    }
}

impl Cause {
    /// Classify an arbitrary error as a cause.
    ///
    /// Classified errors and message layers keep their identity; everything
    /// else becomes [`Cause::Opaque`].
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(err))
    }

    /// Classify an already boxed error as a cause
    #[must_use]
    pub fn from_boxed(err: Box<dyn StdError + Send + Sync>) -> Self {
        match err.downcast::<ClassifiedError>() {
            Ok(classified) => Cause::Classified(*classified),
            Err(err) => match err.downcast::<MessageLayer>() {
                Ok(layer) => Cause::Message(*layer),
                Err(err) => Cause::Opaque(Arc::from(err)),
            },
        }
    }

    /// View the cause as a standard error
    #[must_use]
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        match self {
            Cause::Classified(err) => err,
            Cause::Message(layer) => layer,
            Cause::Opaque(err) => err.as_ref(),
        }
    }

    /// The classified error, if this cause is one
    #[must_use]
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Cause::Classified(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClassifiedError> for Cause {
    fn from(err: ClassifiedError) -> Self {
        Cause::Classified(err)
    }
}

impl From<anyhow::Error> for Cause {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ClassifiedError>() {
            Ok(classified) => Cause::Classified(classified),
            Err(err) => Self::from_boxed(err.into()),
        }
    }
}

/// Result type alias using [`ClassifiedError`]
pub type Result<T> = std::result::Result<T, ClassifiedError>;
