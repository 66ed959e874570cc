//! Display and trait implementations for errors

use std::error::Error as StdError;
use std::fmt;

use super::types::{Cause, ClassifiedError, MessageLayer, Shape};

const RULE: &str = "--------------------------------";

impl ClassifiedError {
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = &self.inner;
        if inner.shape == Shape::Aggregate {
            return if inner.message.is_empty() {
                write!(f, "{}", inner.details)
            } else {
                write!(f, "{} [{}]", inner.message, inner.details)
            };
        }
        match (&inner.cause, inner.message.is_empty()) {
            (None, true) => f.write_str("error"),
            (None, false) => f.write_str(&inner.message),
            (Some(cause), true) => write!(f, "{cause}"),
            (Some(cause), false) => write!(f, "{} [{cause}]", inner.message),
        }
    }
}

/// `{}` renders the message chain, `"outer [inner [root]]"`.
/// `{:#}` adds the creation stacktrace.
impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("### ")?;
            self.write_text(f)?;
            return write!(f, "\n{}\n{RULE}", self.inner.stacktrace);
        }
        self.write_text(f)
    }
}

impl fmt::Debug for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = &self.inner;
        let mut out = f.debug_struct("ClassifiedError");
        out.field("kind", &inner.kind)
            .field("message", &inner.message)
            .field("cause", &inner.cause);
        if !inner.details.is_empty() {
            out.field("details", &inner.details);
        }
        out.field("location", &format_args!("{}", inner.stacktrace.location()))
            .finish()
    }
}

impl StdError for ClassifiedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|cause| cause.as_error() as &(dyn StdError + 'static))
    }
}

impl fmt::Display for MessageLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            None => f.write_str(&self.message),
            Some(cause) => write!(f, "{} [{cause}]", self.message),
        }
    }
}

impl StdError for MessageLayer {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause.as_error() as &(dyn StdError + 'static))
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Classified(err) => fmt::Display::fmt(err, f),
            Cause::Message(layer) => fmt::Display::fmt(layer, f),
            Cause::Opaque(err) => fmt::Display::fmt(err, f),
        }
    }
}
