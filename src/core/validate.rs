use crate::domain::model::{Field, FieldError, RegistrationForm, RegistrationRecord};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

// One or more non-whitespace/non-@ characters, '@', same, '.', same.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validates the six form fields in fixed order, short-circuiting on the
/// first failure. On success the returned record carries trimmed field
/// values and `now` as its submission timestamp.
pub fn validate(
    form: &RegistrationForm,
    now: DateTime<Utc>,
) -> std::result::Result<RegistrationRecord, FieldError> {
    let first_name = form.first_name.trim();
    if first_name.is_empty() {
        return Err(FieldError::new(
            Field::FirstName,
            "Please enter your first name.",
        ));
    }

    let last_name = form.last_name.trim();
    if last_name.is_empty() {
        return Err(FieldError::new(
            Field::LastName,
            "Please enter your last name.",
        ));
    }

    let email = form.email.trim();
    if email.is_empty() || !is_valid_email(email) {
        return Err(FieldError::new(
            Field::Email,
            "Please enter a valid email address.",
        ));
    }

    let specialty = form.specialty.trim();
    if specialty.is_empty() {
        return Err(FieldError::new(
            Field::Specialty,
            "Please select your specialty.",
        ));
    }

    let stage = form.stage.trim();
    if stage.is_empty() {
        return Err(FieldError::new(
            Field::Stage,
            "Please select your current stage.",
        ));
    }

    if !form.agreement_accepted {
        return Err(FieldError::new(
            Field::Agreement,
            "Please agree to receive event updates from AMON.",
        ));
    }

    Ok(RegistrationRecord {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        specialty: specialty.to_string(),
        stage: stage.to_string(),
        timestamp: now,
    })
}
