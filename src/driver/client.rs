//! Driver side of the relay call.

use reqwest::Client;
use serde_json::Value;

use crate::relay::types::json_or_text;
use crate::relay::InvokeRequest;

/// What the relay answered, before unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResult {
    pub http_status: u16,
    /// Parsed JSON, or the raw text when the reply is not JSON.
    pub body: Value,
}

impl InvocationResult {
    pub fn from_text(http_status: u16, text: String) -> Self {
        Self {
            http_status,
            body: json_or_text(text),
        }
    }

    /// Status and body with the relay envelope removed.
    ///
    /// `awsStatus`/`awsBody` win when present and non-null; otherwise the
    /// relay's own status and body are used.
    pub fn unwrap_remote(&self) -> (Value, Value) {
        let field = |name: &str| {
            self.body
                .as_object()
                .and_then(|o| o.get(name))
                .filter(|v| !v.is_null())
                .cloned()
        };

        let status = field("awsStatus").unwrap_or_else(|| Value::from(self.http_status));
        let body = field("awsBody").unwrap_or_else(|| self.body.clone());
        (status, body)
    }
}

/// Whether a status (number or text) reads as 2xx.
pub fn is_success_status(status: &Value) -> bool {
    status_text(status).starts_with('2')
}

/// Status rendered the way it appears in log metadata.
pub fn status_text(status: &Value) -> String {
    match status {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Posts invoke instructions to the relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), relay_url)
    }

    pub fn with_client(client: Client, relay_url: impl Into<String>) -> Self {
        Self {
            client,
            relay_url: relay_url.into(),
        }
    }

    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    pub async fn invoke(&self, request: &InvokeRequest) -> Result<InvocationResult, reqwest::Error> {
        let response = self.client.post(&self.relay_url).json(request).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(InvocationResult::from_text(status, text))
    }
}
