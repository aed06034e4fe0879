use crate::domain::model::FieldError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("Webhook request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("Delivery error: {message}")]
    DeliveryError { message: String },
}

impl From<FieldError> for LandingError {
    fn from(err: FieldError) -> Self {
        LandingError::ValidationError {
            field: err.field.name().to_string(),
            message: err.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, LandingError>;
