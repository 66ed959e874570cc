//! Causal chain inspection

use std::error::Error as StdError;
use std::io;

use super::types::{ClassifiedError, Kind, MessageLayer};

/// Direct cause of `err`, if it exposes one
#[must_use]
pub fn cause<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// Follow the cause chain to its end.
///
/// Returns the last error in the chain. A wrapper whose cause is absent is
/// itself the root.
#[must_use]
pub fn root_err<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// Returns `true` when `err` is classified as `kind`.
///
/// Only [`Kind::Other`] is looked through: an error of any other kind
/// answers for itself and never for its causes.
#[must_use]
pub fn is_kind(kind: Kind, err: &(dyn StdError + 'static)) -> bool {
    if let Some(classified) = err.downcast_ref::<ClassifiedError>() {
        if classified.kind() == kind {
            return true;
        }
        if classified.kind() != Kind::Other {
            return false;
        }
        return classified.source().is_some_and(|next| is_kind(kind, next));
    }
    if let Some(layer) = err.downcast_ref::<MessageLayer>() {
        return layer.source().is_some_and(|next| is_kind(kind, next));
    }
    false
}

/// Returns `true` when `err` or any of its sources is an I/O timeout
#[must_use]
pub fn is_timeout(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if err
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::TimedOut)
        {
            return true;
        }
        current = err.source();
    }
    false
}
