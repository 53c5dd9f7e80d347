//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Relay and driver produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → spans.rs (per-request spans with request IDs)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the trace span into every handler event
//! - Metrics are optional and off by default

pub mod logging;
pub mod metrics;
pub mod spans;
