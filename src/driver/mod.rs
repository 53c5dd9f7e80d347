//! Demo driver subsystem.
//!
//! # Data Flow
//! ```text
//! Command (console line, test, caller)
//!     → dispatcher.rs (single entry point, per-step state machine)
//!     → catalog.rs (immutable step lookup)
//!     → client.rs (POST instruction to the relay, unwrap envelope)
//!     → log.rs + status.rs (newest-first log, one-line status)
//!     → render.rs (coloured text for the console)
//! ```
//!
//! # Design Decisions
//! - The catalog is injected at startup and never mutated
//! - Requests only go out in response to an `Execute` command
//! - No retries, polling, or background refresh

pub mod catalog;
pub mod client;
pub mod command;
pub mod dispatcher;
pub mod log;
pub mod render;
pub mod status;

pub use catalog::{Step, StepCatalog};
pub use client::{InvocationResult, RelayClient};
pub use command::Command;
pub use dispatcher::{Driver, DriverError, DriverView, Outcome, StepReport, StepState, StepView};
pub use log::{ActivityLog, LogEntry, LogKind};
pub use status::{StatusLine, StatusTone};
