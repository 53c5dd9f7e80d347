//! `/api/invoke` handler.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics::{self, Outcome};
use crate::relay::{InvokeEnvelope, InvokeRequest, RelayError};

/// Answers pre-flight, refuses non-POST methods, and relays POSTs.
pub async fn invoke_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    match method {
        Method::OPTIONS => Ok(StatusCode::NO_CONTENT.into_response()),
        Method::POST => {
            let envelope = relay(&state, headers.request_id(), &body).await?;
            Ok((StatusCode::OK, Json(envelope)).into_response())
        }
        other => {
            tracing::debug!(method = %other, "Method not allowed on invoke route");
            metrics::record_invocation(Outcome::Rejected, Instant::now());
            Err(RelayError::MethodNotAllowed)
        }
    }
}

async fn relay(state: &AppState, request_id: &str, raw: &[u8]) -> Result<InvokeEnvelope, RelayError> {
    let start = Instant::now();

    let request = match InvokeRequest::from_slice(raw) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(request_id = %request_id, "Instruction without baseUrl or path");
            metrics::record_invocation(Outcome::Rejected, start);
            return Err(e);
        }
    };

    tracing::debug!(
        request_id = %request_id,
        target = %request.target_url(),
        "Forwarding invocation"
    );

    match state.forwarder.forward(&request).await {
        Ok(reply) => {
            tracing::info!(
                request_id = %request_id,
                path = %request.path,
                remote_status = reply.status,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Invocation relayed"
            );
            metrics::record_invocation(Outcome::Forwarded, start);
            Ok(InvokeEnvelope::from_reply(reply))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                target = %request.target_url(),
                error = %e,
                "Remote call failed"
            );
            metrics::record_invocation(Outcome::Failed, start);
            Err(e)
        }
    }
}
