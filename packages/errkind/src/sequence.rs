//! Sequencing helpers

use thiserror::Error;

use crate::error::ClassifiedError;

/// Runs fallible steps until the first one fails.
///
/// ```
/// use errkind::{ClassifiedError, Kind, UntilFirst};
///
/// let mut ran = Vec::new();
/// let mut steps = UntilFirst::new();
/// steps
///     .step(|| { ran.push(1); Ok(()) })
///     .step(|| Err(ClassifiedError::new(Kind::Invalid, "bad input")))
///     .step(|| { ran.push(3); Ok(()) });
/// assert_eq!(ran, vec![1]);
/// assert!(steps.into_result().is_err());
/// ```
#[derive(Debug, Default)]
pub struct UntilFirst {
    err: Option<ClassifiedError>,
}

impl UntilFirst {
    /// Nothing run yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` unless an earlier step failed
    pub fn step<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), ClassifiedError>,
    {
        if self.err.is_none() {
            self.err = f().err();
        }
        self
    }

    /// The first failure, if any
    #[must_use]
    pub fn err(&self) -> Option<&ClassifiedError> {
        self.err.as_ref()
    }

    /// `Err` with the first failure, `Ok` when every step passed
    pub fn into_result(self) -> crate::Result<()> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Unclassified error carrying only a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PlainError(pub String);

/// A plain error whose message is `parts` joined with single spaces
pub fn seq<I, S>(parts: I) -> PlainError
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut message = String::new();
    for (idx, part) in parts.into_iter().enumerate() {
        if idx > 0 {
            message.push(' ');
        }
        message.push_str(part.as_ref());
    }
    PlainError(message)
}
