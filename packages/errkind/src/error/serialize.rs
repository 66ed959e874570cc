//! Client-facing JSON rendering
//!
//! Request-kind errors expose their message and structure. Every other kind
//! renders as a single redacted string: cause, details and stacktrace never
//! leave the process through this path.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::types::{Cause, ClassifiedError, MessageLayer, Shape};

/// Prefix of the redacted rendering of non-request errors
pub const REDACTED_PREFIX: &str = "Internal server error: ";

/// Errors that know how to render themselves for clients
pub trait SelfDescribing {
    /// Render as JSON bytes
    fn marshal_json(&self) -> serde_json::Result<Vec<u8>>;
}

impl ClassifiedError {
    /// Render as client-facing JSON bytes
    pub fn marshal_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Render as a client-facing JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl SelfDescribing for ClassifiedError {
    fn marshal_json(&self) -> serde_json::Result<Vec<u8>> {
        ClassifiedError::marshal_json(self)
    }
}

impl SelfDescribing for MessageLayer {
    fn marshal_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl Cause {
    /// The cause as a self-rendering error, when it is one
    #[must_use]
    pub fn as_self_describing(&self) -> Option<&dyn SelfDescribing> {
        match self {
            Cause::Classified(err) => Some(err),
            Cause::Message(layer) => Some(layer),
            Cause::Opaque(_) => None,
        }
    }
}

// Keys are written in sorted order: "err" before "msg".
impl Serialize for ClassifiedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let inner = &self.inner;
        if !inner.kind.is_request() {
            return serializer.collect_str(&format_args!("{REDACTED_PREFIX}{}", inner.message));
        }
        match inner.shape {
            Shape::Aggregate if inner.message.is_empty() => inner.details.serialize(serializer),
            Shape::Aggregate => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("err", &inner.details)?;
                map.serialize_entry("msg", &inner.message)?;
                map.end()
            }
            Shape::Layered => serialize_layer(serializer, &inner.message, inner.cause.as_ref()),
        }
    }
}

impl Serialize for MessageLayer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_layer(serializer, &self.message, self.cause.as_deref())
    }
}

/// Self-rendering causes nest; anything else contributes its text only.
impl Serialize for Cause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cause::Classified(err) => err.serialize(serializer),
            Cause::Message(layer) => layer.serialize(serializer),
            Cause::Opaque(err) => serializer.collect_str(err),
        }
    }
}

fn serialize_layer<S: Serializer>(
    serializer: S,
    message: &str,
    cause: Option<&Cause>,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1 + usize::from(cause.is_some())))?;
    if let Some(cause) = cause {
        map.serialize_entry("err", cause)?;
    }
    map.serialize_entry("msg", message)?;
    map.end()
}
