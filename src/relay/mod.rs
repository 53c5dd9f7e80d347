//! Invoke relay subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/invoke {baseUrl, path, body}
//!     → types.rs (instruction extraction, target = baseUrl + path)
//!     → forwarder.rs (single outbound POST, read full text)
//!     → types.rs (JSON parse or raw text)
//!     → 200 {ok, awsStatus, awsBody}
//!
//! Failures:
//!     → error.rs (400 missing target, 405 method, 500 proxy error)
//! ```
//!
//! # Design Decisions
//! - The remote status never becomes the relay's own status
//! - No retries, no caching, no target allow-list
//! - Stateless: nothing survives a single invocation

pub mod error;
pub mod forwarder;
pub mod types;

pub use error::RelayError;
pub use forwarder::Forwarder;
pub use types::{InvokeEnvelope, InvokeRequest, UpstreamReply};
