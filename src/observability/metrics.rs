//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_invocations_total` (counter): invocations by outcome
//! - `relay_invocation_duration_seconds` (histogram): latency by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so handlers call the `record_*` helpers unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Outcome label for one invoke call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The remote answered (any status).
    Forwarded,
    /// The instruction or method was refused.
    Rejected,
    /// The outbound call failed.
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Forwarded => "forwarded",
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
        }
    }
}

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_invocation(outcome: Outcome, start: Instant) {
    let label = outcome.as_str();
    metrics::counter!("relay_invocations_total", "outcome" => label).increment(1);
    metrics::histogram!("relay_invocation_duration_seconds", "outcome" => label)
        .record(start.elapsed().as_secs_f64());
}
