use thiserror::Error as ThisError;

///
/// DecodeError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum DecodeError {
    #[error("{0}")]
    Custom(String),

    #[error("expected an object, found {found}")]
    ExpectedObject { found: &'static str },

    #[error("invalid value for key `{key}`: {message}")]
    InvalidValue { key: String, message: String },

    #[error("missing required key `{key}`")]
    MissingKey { key: String },
}

impl DecodeError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    pub fn invalid_value(key: &str, err: impl std::fmt::Display) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    pub fn missing_key(key: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
        }
    }
}
