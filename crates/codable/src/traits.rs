use crate::{container::KeyedContainer, error::DecodeError};
use serde_json::Value;

///
/// Decode
///
/// Rebuilds a value from a keyed source. Either every stored field is read
/// or an error is returned; no partial value escapes.
///

pub trait Decode: Sized {
    fn decode<C>(container: &C) -> Result<Self, DecodeError>
    where
        C: KeyedContainer + ?Sized;
}

// from_json
/// Decode `T` from a JSON object.
pub fn from_json<T: Decode>(value: &Value) -> Result<T, DecodeError> {
    match value {
        Value::Object(map) => T::decode(map),
        Value::Null => Err(DecodeError::ExpectedObject { found: "null" }),
        Value::Bool(_) => Err(DecodeError::ExpectedObject { found: "a boolean" }),
        Value::Number(_) => Err(DecodeError::ExpectedObject { found: "a number" }),
        Value::String(_) => Err(DecodeError::ExpectedObject { found: "a string" }),
        Value::Array(_) => Err(DecodeError::ExpectedObject { found: "an array" }),
    }
}

///
/// KeySet
///
/// The serialization keys of a record, in field declaration order.
///

pub trait KeySet: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    #[must_use]
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == key)
    }
}

///
/// Record
///
/// Metadata every `record!` expansion publishes. `EXCLUDED` lists the fields
/// carrying an exclusion marker after the ignore pre-pass.
///

pub trait Record {
    const TYPE_NAME: &'static str;
    const EXCLUDED: &'static [&'static str];

    #[must_use]
    fn is_excluded(field: &str) -> bool {
        Self::EXCLUDED.iter().any(|excluded| *excluded == field)
    }
}
