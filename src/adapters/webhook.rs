use crate::domain::model::WebhookPayload;
use crate::domain::ports::WebhookTransport;
use crate::utils::error::{LandingError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Preferred transport: one JSON POST. Mirrors `navigator.sendBeacon`
/// semantics: success means the payload was handed to the network, and the
/// endpoint's response status is ignored entirely.
pub struct BeaconTransport {
    client: Client,
    url: String,
}

impl BeaconTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl WebhookTransport for BeaconTransport {
    async fn send(&self, payload: &WebhookPayload) -> Result<bool> {
        tracing::debug!("Posting beacon payload to {}", self.url);
        let response = self.client.post(&self.url).json(payload).send().await?;
        tracing::debug!("Webhook responded {} (ignored)", response.status());
        Ok(true)
    }
}

/// Fallback transport, standing in for the hidden-frame form submission:
/// every payload field is serialized to a string and POSTed URL-encoded.
/// The response is ignored here too.
pub struct FormTransport {
    client: Client,
    url: String,
}

impl FormTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl WebhookTransport for FormTransport {
    async fn send(&self, payload: &WebhookPayload) -> Result<bool> {
        let fields = string_fields(payload)?;
        tracing::debug!("Posting {} form fields to {}", fields.len(), self.url);
        let response = self.client.post(&self.url).form(&fields).send().await?;
        tracing::debug!("Webhook responded {} (ignored)", response.status());
        Ok(true)
    }
}

/// Flattens the payload into string form fields; non-string values are
/// pre-serialized to their JSON text.
fn string_fields(payload: &WebhookPayload) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(payload)?;
    let object = match value {
        serde_json::Value::Object(object) => object,
        other => {
            return Err(LandingError::DeliveryError {
                message: format!("payload did not serialize to an object: {}", other),
            })
        }
    };

    Ok(object
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect())
}
