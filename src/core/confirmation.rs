use crate::core::registration::REGISTRATION_KEY;
use crate::domain::model::{ConfirmationView, RegistrationRecord};
use crate::domain::ports::KeyValueStore;

/// Reads the persisted registration back from the store. Absent entries,
/// read failures, and unparsable values all yield `None`; the failures are
/// logged and never surfaced.
pub async fn load_record<S: KeyValueStore>(store: &S) -> Option<RegistrationRecord> {
    let raw = match store.get(REGISTRATION_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::error!("Failed to read registration data: {}", e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!("Error parsing registration data: {}", e);
            None
        }
    }
}

/// Renders the confirmation view. With a record present, personalizes the
/// greeting and appends the registration timestamp line; otherwise the
/// default view is returned unchanged.
pub fn render_confirmation(record: Option<&RegistrationRecord>) -> ConfirmationView {
    match record {
        Some(record) => ConfirmationView {
            greeting: Some(format!("You're in, {}! ✅", record.first_name)),
            registered_line: Some(format!(
                "Registered on: {}",
                record.timestamp.format("%B %-d, %Y %H:%M UTC")
            )),
        },
        None => ConfirmationView::default(),
    }
}
