pub mod confirmation;
pub mod engine;
pub mod registration;
pub mod status;
pub mod validate;

pub use crate::domain::model::{
    ConfirmationView, EventStatus, EventWindow, FieldError, RegistrationForm,
    RegistrationRecord, StatusView, WebhookPayload,
};
pub use crate::domain::ports::{
    Clock, ConfigProvider, KeyValueStore, StatusDisplay, WebhookTransport,
};
pub use crate::utils::error::Result;
