//! Wire types for the invoke endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::error::RelayError;

/// An instruction to forward one POST to `base_url + path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub base_url: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<Value>,
}

impl InvokeRequest {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>, body: Value) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            body: Some(body),
        }
    }

    /// Pull an instruction out of an arbitrary JSON document.
    ///
    /// Anything that is not an object with non-empty string `baseUrl` and
    /// `path` fields is rejected with [`RelayError::MissingTarget`].
    ///
    /// Non-string values such as `42` or `true` are rejected as well rather
    /// than stringified into a target URL, so they get a 400 instead of a
    /// forward attempt.
    pub fn from_instruction(instruction: &Value) -> Result<Self, RelayError> {
        let base_url = non_empty_str(instruction.get("baseUrl"));
        let path = non_empty_str(instruction.get("path"));

        match (base_url, path) {
            (Some(base_url), Some(path)) => Ok(Self {
                base_url: base_url.to_string(),
                path: path.to_string(),
                body: instruction.get("body").cloned(),
            }),
            _ => Err(RelayError::MissingTarget),
        }
    }

    /// Same as [`from_instruction`](Self::from_instruction) but from raw
    /// request bytes. Unparseable input counts as an empty instruction.
    pub fn from_slice(raw: &[u8]) -> Result<Self, RelayError> {
        let instruction = serde_json::from_slice::<Value>(raw).unwrap_or(Value::Null);
        Self::from_instruction(&instruction)
    }

    /// The target is a plain concatenation; no escaping or normalization.
    pub fn target_url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    /// Serialized outbound body. Absent or null bodies become `{}`.
    pub fn outbound_body(&self) -> String {
        match &self.body {
            None | Some(Value::Null) => "{}".to_string(),
            Some(body) => body.to_string(),
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Successful relay reply: the remote status and body, whatever they were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeEnvelope {
    pub ok: bool,
    pub aws_status: u16,
    pub aws_body: Value,
}

impl InvokeEnvelope {
    pub fn from_reply(reply: UpstreamReply) -> Self {
        Self {
            ok: true,
            aws_status: reply.status,
            aws_body: reply.body,
        }
    }
}

/// What came back from the remote API.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    pub fn from_text(status: u16, text: String) -> Self {
        Self {
            status,
            body: json_or_text(text),
        }
    }
}

/// Parsed JSON when `text` is a JSON document, otherwise the text itself.
/// A literal `null` document is kept as text.
pub fn json_or_text(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Null) | Err(_) => Value::String(text),
        Ok(parsed) => parsed,
    }
}
