//! Errors raised by the classification engine

use thiserror::Error;

use crate::models::ReadingField;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationError {
    /// A reading field is non-finite or physically implausible
    #[error("invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: ReadingField,
        value: f64,
        reason: String,
    },

    /// The constant cluster or crop tables are malformed
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClassificationError {
    pub fn invalid(field: ReadingField, value: f64, reason: impl Into<String>) -> Self {
        ClassificationError::InvalidInput {
            field,
            value,
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, ClassificationError>;
