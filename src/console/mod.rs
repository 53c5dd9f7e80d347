//! Terminal front-end for the driver.
//!
//! # Data Flow
//! ```text
//! Operator (inquire menu, or piped command lines)
//!     → session.rs (launch steps as tasks, apply other commands)
//!     → Driver (shared through Arc)
//!     → finished step reports → render → terminal
//! ```
//!
//! # Design Decisions
//! - A step in flight never blocks the menu or other steps
//! - Prompts go through the `ConsoleUi` trait so sessions can be scripted

pub mod menu;
pub mod session;
pub mod ui;

pub use menu::{menu_items, MenuItem};
pub use session::{run_interactive, run_script, Session, StepResult};
pub use ui::{ConsoleError, ConsoleUi, InquireUi, PlainUi};
