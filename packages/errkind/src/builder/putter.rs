//! Key-bound error sinks

use std::cell::Cell;
use std::rc::Rc;

use super::builder::ErrorBuilder;
use super::map::Detail;

/// Separator between a putter key and its sub-keys
pub const PUTTER_SEPARATOR: &str = ":";

/// Records errors without knowing the key they are stored under.
///
/// Lets a validation helper report problems for whatever field its caller
/// bound it to:
///
/// ```
/// use errkind::{ErrorBuilder, Putter};
///
/// fn validate_name(name: &str, errp: &impl Putter) {
///     if name.len() < 3 {
///         errp.put("name is too short");
///     }
/// }
///
/// let errb = ErrorBuilder::new();
/// validate_name("al", &errb.putter("first_name"));
/// validate_name("alice", &errb.putter("last_name"));
/// assert_eq!(errb.len(), 1);
/// ```
pub trait Putter {
    /// Record `value`; nil values are ignored
    fn put(&self, value: impl Into<Detail>);

    /// A putter for the sub-key `key`
    #[must_use]
    fn fork(&self, key: &str) -> Self
    where
        Self: Sized;

    /// [`Putter::fork`] with an index
    #[must_use]
    fn fork_index(&self, idx: usize) -> Self
    where
        Self: Sized,
    {
        self.fork(&idx.to_string())
    }
}

/// A [`Putter`] writing into an [`ErrorBuilder`] under one key
#[derive(Debug, Clone)]
pub struct KeyPutter {
    builder: ErrorBuilder,
    key: String,
}

impl KeyPutter {
    pub(super) fn new(builder: ErrorBuilder, key: String) -> Self {
        Self { builder, key }
    }

    /// Key used for puts, relative to the builder prefix
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Putter for KeyPutter {
    fn put(&self, value: impl Into<Detail>) {
        self.builder.put(&self.key, value);
    }

    fn fork(&self, key: &str) -> Self {
        let key = if self.key.is_empty() {
            key.to_owned()
        } else {
            format!("{}{PUTTER_SEPARATOR}{key}", self.key)
        };
        Self::new(self.builder.clone(), key)
    }
}

/// A [`Putter`] that drops values and only remembers that one was put.
///
/// Forks share the flag with the putter they came from.
#[derive(Debug, Clone, Default)]
pub struct StubPutter {
    hit: Rc<Cell<bool>>,
}

impl StubPutter {
    /// A fresh stub with nothing recorded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once a non-nil value was put through this stub or any
    /// of its forks
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.hit.get()
    }
}

impl Putter for StubPutter {
    fn put(&self, value: impl Into<Detail>) {
        if !value.into().is_nil() {
            self.hit.set(true);
        }
    }

    fn fork(&self, _key: &str) -> Self {
        self.clone()
    }
}
