//! Keyed details storage

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClassifiedError;

/// A value stored in an [`ErrorMap`].
///
/// Plain values are kept as JSON; classified errors keep their identity so
/// they render through their own redaction rules.
#[derive(Debug, Clone)]
pub enum Detail {
    /// Any JSON-representable value; `Null` is the nil detail
    Value(Value),
    /// A classified error
    Error(ClassifiedError),
    /// Values put repeatedly under the same key, oldest first
    Chain(Vec<Detail>),
}

impl Detail {
    /// The nil detail, ignored by builders
    pub const NIL: Detail = Detail::Value(Value::Null);

    /// Returns `true` for the nil detail
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Detail::Value(Value::Null))
    }

    /// Values of a chain, or this detail alone
    #[must_use]
    pub fn as_slice(&self) -> &[Detail] {
        match self {
            Detail::Chain(items) => items,
            single => std::slice::from_ref(single),
        }
    }

    /// The JSON value, when this is a plain value
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Detail::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The string, when this is a plain string value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// The error, when this is a classified error
    #[must_use]
    pub fn as_error(&self) -> Option<&ClassifiedError> {
        match self {
            Detail::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Render as a JSON value using the client-facing error form
    pub fn to_json_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

// Errors compare by kind and text; they carry no structural equality.
impl PartialEq for Detail {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Detail::Value(a), Detail::Value(b)) => a == b,
            (Detail::Error(a), Detail::Error(b)) => {
                a.kind() == b.kind() && a.to_string() == b.to_string()
            }
            (Detail::Chain(a), Detail::Chain(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Value(Value::String(text)) => f.write_str(text),
            Detail::Value(value) => write!(f, "{value}"),
            Detail::Error(err) => write!(f, "{err}"),
            Detail::Chain(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Detail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Detail::Value(value) => value.serialize(serializer),
            Detail::Error(err) => err.serialize(serializer),
            Detail::Chain(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<Value> for Detail {
    fn from(value: Value) -> Self {
        Detail::Value(value)
    }
}

impl From<ClassifiedError> for Detail {
    fn from(err: ClassifiedError) -> Self {
        Detail::Error(err)
    }
}

impl From<&str> for Detail {
    fn from(text: &str) -> Self {
        Detail::Value(Value::String(text.to_owned()))
    }
}

impl From<String> for Detail {
    fn from(text: String) -> Self {
        Detail::Value(Value::String(text))
    }
}

macro_rules! detail_from_scalar {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Detail {
                fn from(value: $ty) -> Self {
                    Detail::Value(Value::from(value))
                }
            }
        )+
    };
}

detail_from_scalar!(bool, i32, i64, u32, u64, usize, f64);

/// `None` is the nil detail
impl<T: Into<Detail>> From<Option<T>> for Detail {
    fn from(value: Option<T>) -> Self {
        value.map_or(Detail::NIL, Into::into)
    }
}

/// Details keyed by `|`-joined paths.
///
/// Keys are kept sorted, which makes both the text and the JSON form
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorMap {
    entries: BTreeMap<String, Detail>,
}

impl ErrorMap {
    /// An empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, chaining it after any value already there.
    ///
    /// The first value is stored alone. The second turns the entry into a
    /// chain `[first, second]`, and later values extend that same chain.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<Detail>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
            btree_map::Entry::Occupied(mut slot) => match slot.get_mut() {
                Detail::Chain(items) => items.push(value),
                existing => {
                    let first = std::mem::replace(existing, Detail::NIL);
                    *existing = Detail::Chain(vec![first, value]);
                }
            },
        }
    }

    /// Store `value` under `key`, replacing any value already there
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Detail>) {
        self.entries.insert(key.into(), value.into());
    }

    /// The value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Detail> {
        self.entries.get(key)
    }

    /// Returns `true` when `key` holds a value
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no key holds a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Detail)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Detail>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.append(key, value);
        }
        map
    }
}
