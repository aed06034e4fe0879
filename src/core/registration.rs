use crate::core::validate::validate;
use crate::domain::model::{RegistrationForm, RegistrationRecord, WebhookPayload};
use crate::domain::ports::{Clock, ConfigProvider, KeyValueStore, WebhookTransport};
use crate::utils::error::Result;
use std::sync::Arc;

/// Store key holding the persisted registration record.
pub const REGISTRATION_KEY: &str = "registrationData";

/// Constant event tag carried by every webhook payload.
pub const REGISTRATION_EVENT: &str = "registration";

/// How a delivery attempt concluded. Returned for observability; the
/// submit path is permitted to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Beacon,
    FormFallback,
    Failed,
}

/// Two-tier fire-and-forget delivery: beacon first, form fallback when the
/// beacon errors or declines. Every failure is logged here and suppressed;
/// this function never returns an error.
pub async fn deliver(
    beacon: &dyn WebhookTransport,
    fallback: &dyn WebhookTransport,
    payload: &WebhookPayload,
) -> DeliveryOutcome {
    match beacon.send(payload).await {
        Ok(true) => {
            tracing::debug!("Webhook payload delivered via beacon transport");
            return DeliveryOutcome::Beacon;
        }
        Ok(false) => {
            tracing::warn!("Beacon transport declined the payload, trying form fallback");
        }
        Err(e) => {
            tracing::warn!("Beacon transport failed ({}), trying form fallback", e);
        }
    }

    match fallback.send(payload).await {
        Ok(true) => {
            tracing::debug!("Webhook payload delivered via form fallback");
            DeliveryOutcome::FormFallback
        }
        Ok(false) => {
            tracing::warn!("Form fallback declined the payload; delivery abandoned");
            DeliveryOutcome::Failed
        }
        Err(e) => {
            tracing::warn!("Webhook delivery failed on both transports: {}", e);
            DeliveryOutcome::Failed
        }
    }
}

/// Validate -> persist -> spawn delivery. Persistence always completes
/// before delivery is attempted; delivery is never awaited by the caller.
pub struct RegistrationPipeline<S: KeyValueStore, C: ConfigProvider> {
    store: S,
    config: C,
    clock: Arc<dyn Clock>,
    beacon: Arc<dyn WebhookTransport>,
    fallback: Arc<dyn WebhookTransport>,
}

impl<S, C> RegistrationPipeline<S, C>
where
    S: KeyValueStore,
    C: ConfigProvider,
{
    pub fn new(
        store: S,
        config: C,
        clock: Arc<dyn Clock>,
        beacon: Arc<dyn WebhookTransport>,
        fallback: Arc<dyn WebhookTransport>,
    ) -> Self {
        Self {
            store,
            config,
            clock,
            beacon,
            fallback,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Runs validation and persistence, then spawns the webhook delivery.
    /// Returns once the record is persisted; the delivery task runs on its
    /// own and cannot fail this call.
    pub async fn submit(&self, form: &RegistrationForm) -> Result<RegistrationRecord> {
        let record = validate(form, self.clock.now())?;
        self.persist(&record).await?;

        let payload = self.payload_for(&record);
        let beacon = Arc::clone(&self.beacon);
        let fallback = Arc::clone(&self.fallback);
        tokio::spawn(async move {
            // Outcome is logged inside deliver; nothing waits on it.
            let _ = deliver(beacon.as_ref(), fallback.as_ref(), &payload).await;
        });

        Ok(record)
    }

    /// Serializes the record and overwrites the single well-known store
    /// entry. No merge, no history.
    pub async fn persist(&self, record: &RegistrationRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.store.set(REGISTRATION_KEY, &json).await?;
        tracing::debug!("Registration record stored under '{}'", REGISTRATION_KEY);
        Ok(())
    }

    pub fn payload_for(&self, record: &RegistrationRecord) -> WebhookPayload {
        WebhookPayload {
            event: REGISTRATION_EVENT.to_string(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            specialty: record.specialty.clone(),
            stage: record.stage.clone(),
            registered_at: record.timestamp,
            source: self.config.page_source().to_string(),
            user_agent: self.config.user_agent().to_string(),
            sent_at: self.clock.now(),
        }
    }

    /// Manual verification of the delivery path: one synthetic payload with
    /// fixed placeholder values. Awaited, unlike the submit path.
    pub async fn send_debug_webhook(&self) -> DeliveryOutcome {
        let record = RegistrationRecord {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@example.com".to_string(),
            specialty: "Test Specialty".to_string(),
            stage: "Test Stage".to_string(),
            timestamp: self.clock.now(),
        };
        let payload = self.payload_for(&record);
        tracing::info!(
            "Sending synthetic debug payload to {}",
            self.config.webhook_url()
        );
        deliver(self.beacon.as_ref(), self.fallback.as_ref(), &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EventWindow;
    use crate::utils::error::LandingError;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStore {
        entries: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                entries: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    impl KeyValueStore for MockStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            let entries = self.entries.lock().await;
            Ok(entries.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            let mut entries = self.entries.lock().await;
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn webhook_url(&self) -> &str {
            "https://hooks.test/registration"
        }

        fn event_window(&self) -> EventWindow {
            EventWindow {
                start: "2025-09-08T20:00:00-04:00".parse().unwrap(),
                end: "2025-09-08T21:00:00-04:00".parse().unwrap(),
            }
        }

        fn page_source(&self) -> &str {
            "https://example.org/landing"
        }

        fn user_agent(&self) -> &str {
            "event-landing/test"
        }

        fn submit_delay_ms(&self) -> u64 {
            1000
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    enum MockResponse {
        Accept,
        Decline,
        Fail,
    }

    struct MockTransport {
        calls: Arc<Mutex<Vec<WebhookPayload>>>,
        response: MockResponse,
    }

    impl MockTransport {
        fn new(response: MockResponse) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                response,
            }
        }

        async fn calls(&self) -> Vec<WebhookPayload> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl WebhookTransport for MockTransport {
        async fn send(&self, payload: &WebhookPayload) -> Result<bool> {
            self.calls.lock().await.push(payload.clone());
            match self.response {
                MockResponse::Accept => Ok(true),
                MockResponse::Decline => Ok(false),
                MockResponse::Fail => Err(LandingError::DeliveryError {
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    fn test_now() -> DateTime<Utc> {
        "2025-09-01T12:00:00Z".parse().unwrap()
    }

    fn filled_form() -> RegistrationForm {
        RegistrationForm {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            specialty: "Cardiology".to_string(),
            stage: "Attending".to_string(),
            agreement_accepted: true,
        }
    }

    fn pipeline(
        store: MockStore,
        beacon: Arc<MockTransport>,
        fallback: Arc<MockTransport>,
    ) -> RegistrationPipeline<MockStore, MockConfig> {
        RegistrationPipeline::new(
            store,
            MockConfig,
            Arc::new(FixedClock(test_now())),
            beacon,
            fallback,
        )
    }

    #[tokio::test]
    async fn test_submit_persists_trimmed_record() {
        let store = MockStore::new();
        let beacon = Arc::new(MockTransport::new(MockResponse::Accept));
        let fallback = Arc::new(MockTransport::new(MockResponse::Accept));
        let pipeline = pipeline(store.clone(), beacon, fallback);

        let record = pipeline.submit(&filled_form()).await.unwrap();
        assert_eq!(record.first_name, "Ada");

        let raw = store.get(REGISTRATION_KEY).await.unwrap().unwrap();
        let stored: RegistrationRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, record);
        assert_eq!(stored.timestamp, test_now());
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_form_without_persisting() {
        let store = MockStore::new();
        let beacon = Arc::new(MockTransport::new(MockResponse::Accept));
        let fallback = Arc::new(MockTransport::new(MockResponse::Accept));
        let pipeline = pipeline(store.clone(), Arc::clone(&beacon), fallback);

        let err = pipeline
            .submit(&RegistrationForm::default())
            .await
            .unwrap_err();
        match err {
            LandingError::ValidationError { field, .. } => assert_eq!(field, "firstName"),
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(store.get(REGISTRATION_KEY).await.unwrap().is_none());
        assert!(beacon.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_payload_carries_distinct_timestamps_and_camel_case_keys() {
        let store = MockStore::new();
        let beacon = Arc::new(MockTransport::new(MockResponse::Accept));
        let fallback = Arc::new(MockTransport::new(MockResponse::Accept));
        let pipeline = pipeline(store, beacon, fallback);

        let mut record = validate(&filled_form(), test_now()).unwrap();
        record.timestamp = "2025-08-30T08:00:00Z".parse().unwrap();
        let payload = pipeline.payload_for(&record);

        assert_eq!(payload.event, REGISTRATION_EVENT);
        assert_eq!(payload.registered_at, record.timestamp);
        assert_eq!(payload.sent_at, test_now());
        assert_ne!(payload.registered_at, payload.sent_at);
        assert_eq!(payload.source, "https://example.org/landing");
        assert_eq!(payload.user_agent, "event-landing/test");

        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "event",
            "firstName",
            "lastName",
            "email",
            "specialty",
            "stage",
            "registeredAt",
            "source",
            "userAgent",
            "sentAt",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
    }

    #[tokio::test]
    async fn test_deliver_prefers_beacon() {
        let beacon = MockTransport::new(MockResponse::Accept);
        let fallback = MockTransport::new(MockResponse::Accept);
        let payload = sample_payload();

        let outcome = deliver(&beacon, &fallback, &payload).await;

        assert_eq!(outcome, DeliveryOutcome::Beacon);
        assert_eq!(beacon.calls().await.len(), 1);
        assert!(fallback.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_deliver_falls_back_when_beacon_errors() {
        let beacon = MockTransport::new(MockResponse::Fail);
        let fallback = MockTransport::new(MockResponse::Accept);

        let outcome = deliver(&beacon, &fallback, &sample_payload()).await;

        assert_eq!(outcome, DeliveryOutcome::FormFallback);
        assert_eq!(fallback.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_falls_back_when_beacon_declines() {
        let beacon = MockTransport::new(MockResponse::Decline);
        let fallback = MockTransport::new(MockResponse::Accept);

        let outcome = deliver(&beacon, &fallback, &sample_payload()).await;

        assert_eq!(outcome, DeliveryOutcome::FormFallback);
        assert_eq!(fallback.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_reports_failed_when_both_transports_fail() {
        let beacon = MockTransport::new(MockResponse::Fail);
        let fallback = MockTransport::new(MockResponse::Fail);

        let outcome = deliver(&beacon, &fallback, &sample_payload()).await;

        assert_eq!(outcome, DeliveryOutcome::Failed);
    }

    #[tokio::test]
    async fn test_debug_webhook_sends_placeholder_payload() {
        let store = MockStore::new();
        let beacon = Arc::new(MockTransport::new(MockResponse::Accept));
        let fallback = Arc::new(MockTransport::new(MockResponse::Accept));
        let pipeline = pipeline(store, Arc::clone(&beacon), fallback);

        let outcome = pipeline.send_debug_webhook().await;

        assert_eq!(outcome, DeliveryOutcome::Beacon);
        let calls = beacon.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].event, REGISTRATION_EVENT);
        assert_eq!(calls[0].email, "test@example.com");
        assert_eq!(calls[0].first_name, "Test");
    }

    fn sample_payload() -> WebhookPayload {
        WebhookPayload {
            event: REGISTRATION_EVENT.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            specialty: "Cardiology".to_string(),
            stage: "Attending".to_string(),
            registered_at: test_now(),
            source: "https://example.org/landing".to_string(),
            user_agent: "event-landing/test".to_string(),
            sent_at: test_now(),
        }
    }
}
