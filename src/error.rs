use thiserror::Error;

use crate::model::EntityKind;

/// Failures while turning a wire object into a typed entity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("invalid value '{value}' for field '{field}'")]
    Format { field: String, value: String },

    #[error("no converter registered for {0}")]
    Unsupported(EntityKind),
}

impl MapError {
    pub fn format(field: &str, value: impl Into<String>) -> Self {
        MapError::Format {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

pub type MapResult<T> = std::result::Result<T, MapError>;
