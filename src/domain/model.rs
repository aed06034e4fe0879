use crate::utils::error::{LandingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed live-event window. Immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(LandingError::InvalidConfigValueError {
                field: "event_end".to_string(),
                value: end.to_rfc3339(),
                reason: "event end must be after event start".to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

/// Raw, unvalidated form input as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialty: String,
    pub stage: String,
    pub agreement_accepted: bool,
}

/// A validated registration. Created once per successful validation,
/// never mutated afterwards. Serialized as camelCase JSON into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialty: String,
    pub stage: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload shipped to the webhook. Built fresh per delivery attempt and
/// never persisted. `sent_at` is the delivery timestamp, distinct from the
/// record's own `registered_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub event: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialty: String,
    pub stage: String,
    pub registered_at: DateTime<Utc>,
    pub source: String,
    pub user_agent: String,
    pub sent_at: DateTime<Utc>,
}

/// The six form fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Specialty,
    Stage,
    Agreement,
}

impl Field {
    /// Element-id style name, matching the stored JSON keys.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Specialty => "specialty",
            Field::Stage => "stage",
            Field::Agreement => "agreement",
        }
    }
}

/// First failing field plus its user-facing message. Exactly one per
/// invalid submission; validation short-circuits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Event status as computed from `(now, EventWindow)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Pending {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Live,
    Ended,
}

/// View model for the status display. `emphasis` drives the Live-state
/// highlight; it is never set for Pending or Ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    pub emphasis: bool,
}

/// View model for the confirmation page. Both fields `None` means the
/// static default content is shown unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationView {
    pub greeting: Option<String>,
    pub registered_line: Option<String>,
}
