//! Combining several optional errors into one

use std::error::Error as StdError;
use std::fmt;

use crate::error::Cause;

/// Several errors reported together
#[derive(Debug, Clone)]
pub struct JoinedError {
    errors: Vec<Cause>,
}

impl JoinedError {
    /// The joined errors, in the order given
    #[must_use]
    pub fn errors(&self) -> &[Cause] {
        &self.errors
    }

    /// Number of joined errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; [`join`] never builds an empty value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl StdError for JoinedError {}

/// Join the present errors; `None` when every input is `None`
pub fn join<I, E>(errors: I) -> Option<JoinedError>
where
    I: IntoIterator<Item = Option<E>>,
    E: StdError + Send + Sync + 'static,
{
    let errors: Vec<Cause> = errors.into_iter().flatten().map(Cause::from_error).collect();
    if errors.is_empty() {
        None
    } else {
        Some(JoinedError { errors })
    }
}
