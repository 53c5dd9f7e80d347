//! Outbound leg of the relay: one POST per invocation.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::{RelayConfig, TimeoutConfig};
use crate::relay::error::RelayError;
use crate::relay::types::{InvokeRequest, UpstreamReply};

/// Issues the remote call for an [`InvokeRequest`].
///
/// Holds a pooled `reqwest` client; cloning is cheap.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    /// Build a forwarder from relay and timeout settings.
    pub fn new(relay: &RelayConfig, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = timeouts.upstream_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !relay.use_env_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// POST the instruction's body to its target and read the full reply.
    ///
    /// Any remote status is a successful forward; only transport failures
    /// (including an unusable target URL) are errors.
    pub async fn forward(&self, request: &InvokeRequest) -> Result<UpstreamReply, RelayError> {
        let target = request.target_url();

        let response = self
            .client
            .post(&target)
            .header(CONTENT_TYPE, "application/json")
            .body(request.outbound_body())
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(
            target = %target,
            status,
            body_bytes = text.len(),
            "Remote replied"
        );

        Ok(UpstreamReply::from_text(status, text))
    }
}
