use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

///
/// KeyedContainer
///
/// A source of values addressed by key. `decode` treats a missing key as an
/// error; `decode_if_present` treats a missing key or an explicit null as
/// absent.
///

pub trait KeyedContainer {
    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodeError>;

    fn decode_if_present<T: DeserializeOwned>(&self, key: &str)
    -> Result<Option<T>, DecodeError>;
}

impl KeyedContainer for Map<String, Value> {
    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodeError> {
        let value = self.get(key).ok_or_else(|| DecodeError::missing_key(key))?;

        T::deserialize(value).map_err(|err| DecodeError::invalid_value(key, err))
    }

    fn decode_if_present<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, DecodeError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|err| DecodeError::invalid_value(key, err)),
        }
    }
}
