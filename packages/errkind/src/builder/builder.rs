//! Incremental collection of keyed request errors

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::map::{Detail, ErrorMap};
use super::putter::KeyPutter;
use crate::error::ClassifiedError;

/// Separator appended to builder fork prefixes
pub const BUILDER_SEPARATOR: &str = "|";

/// Collects errors under hierarchical keys and turns them into one request
/// error.
///
/// Forks share the same underlying map and differ only in the prefix added
/// to their keys:
///
/// ```
/// use errkind::ErrorBuilder;
///
/// let errb = ErrorBuilder::new();
/// let name = "x";
/// if name.len() < 3 {
///     errb.put("first_name", "name is too short");
/// }
/// errb.fork_index(2).put("email", "missing");
///
/// let err = errb.to_error().expect("builder holds errors");
/// assert_eq!(
///     err.to_json().expect("serializes"),
///     r#"{"2|email":"missing","first_name":"name is too short"}"#
/// );
/// ```
///
/// A builder is single-threaded: it is neither `Send` nor `Sync`, so all
/// forks must stay on the thread that created the root.
#[derive(Debug, Clone, Default)]
pub struct ErrorBuilder {
    map: Rc<RefCell<ErrorMap>>,
    prefix: String,
}

impl ErrorBuilder {
    /// An empty builder with no prefix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix added to every key put through this handle
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// A handle over the same map whose keys are prefixed with
    /// `sub_prefix` followed by `|`
    #[must_use]
    pub fn fork(&self, sub_prefix: &str) -> Self {
        Self {
            map: Rc::clone(&self.map),
            prefix: format!("{}{sub_prefix}{BUILDER_SEPARATOR}", self.prefix),
        }
    }

    /// [`ErrorBuilder::fork`] with a row index
    #[must_use]
    pub fn fork_index(&self, idx: usize) -> Self {
        self.fork(&idx.to_string())
    }

    /// A [`Putter`](super::Putter) bound to `key` under this handle's prefix
    #[must_use]
    pub fn putter(&self, key: impl Into<String>) -> KeyPutter {
        KeyPutter::new(self.clone(), key.into())
    }

    /// Record `value` under the prefixed `key`.
    ///
    /// Nil values are ignored. Repeated puts to one key form a chain.
    pub fn put(&self, key: &str, value: impl Into<Detail>) {
        let value = value.into();
        if value.is_nil() {
            return;
        }
        let full_key = format!("{}{key}", self.prefix);
        tracing::trace!(key = %full_key, "error recorded");
        self.map.borrow_mut().append(full_key, value);
    }

    /// The value currently stored under the prefixed `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Detail> {
        self.map
            .borrow()
            .get(&format!("{}{key}", self.prefix))
            .cloned()
    }

    /// Returns `true` when any handle over this map recorded an error
    #[must_use]
    pub fn not_nil(&self) -> bool {
        !self.map.borrow().is_empty()
    }

    /// Number of keys recorded through any handle
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    /// Returns `true` when nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.not_nil()
    }

    /// Borrow the shared map
    ///
    /// Puts through any handle panic while the borrow is alive.
    #[must_use]
    pub fn details(&self) -> Ref<'_, ErrorMap> {
        self.map.borrow()
    }

    /// A copy of the shared map
    #[must_use]
    pub fn snapshot(&self) -> ErrorMap {
        self.map.borrow().clone()
    }

    #[track_caller]
    #[inline(never)]
    fn finish(&self, skip: usize) -> Option<ClassifiedError> {
        if !self.not_nil() {
            return None;
        }
        let details = self.snapshot();
        tracing::debug!(keys = details.len(), "error builder finalized");
        Some(ClassifiedError::from_details_at(details, "", skip + 1))
    }

    /// A request error holding everything recorded so far, or `None` when
    /// nothing was.
    ///
    /// The error keeps a snapshot: puts made afterwards are not reflected in
    /// it.
    #[track_caller]
    #[inline(never)]
    #[must_use]
    pub fn to_error(&self) -> Option<ClassifiedError> {
        self.finish(1)
    }

    /// [`ErrorBuilder::to_error`] as a `Result`, for use with `?`
    #[track_caller]
    #[inline(never)]
    pub fn to_result(&self) -> crate::Result<()> {
        match self.finish(1) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
