use crate::domain::model::{EventWindow, StatusView, WebhookPayload};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Key-value store holding the persisted registration record. Values are
/// whole serialized documents; `set` overwrites unconditionally.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// One webhook delivery mechanism. `Ok(true)` means the payload was handed
/// to the network; the endpoint's response status is never interpreted.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn send(&self, payload: &WebhookPayload) -> Result<bool>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Status display target. An optional collaborator: callers no-op when
/// none is attached.
pub trait StatusDisplay: Send {
    fn render(&mut self, view: &StatusView);
}

pub trait ConfigProvider: Send + Sync {
    fn webhook_url(&self) -> &str;
    fn event_window(&self) -> EventWindow;
    fn page_source(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn submit_delay_ms(&self) -> u64;
}
