//! Keyed aggregation of request errors
//!
//! An [`ErrorBuilder`] collects per-field validation failures under
//! `|`-separated key paths and converts them into a single request
//! [`ClassifiedError`](crate::ClassifiedError) whose JSON body is the map.

#[allow(clippy::module_inception)]
pub mod builder;
pub mod map;
pub mod putter;

pub use builder::{ErrorBuilder, BUILDER_SEPARATOR};
pub use map::{Detail, ErrorMap};
pub use putter::{KeyPutter, Putter, StubPutter, PUTTER_SEPARATOR};
