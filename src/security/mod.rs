//! Security subsystem.
//!
//! # Responsibilities
//! - headers.rs: permissive CORS headers on every response
//! - limits.rs: inbound body size cap
//!
//! # Known gap
//! The relay forwards to any caller-supplied base URL. It is an open relay
//! and can be used for server-side request forgery; there is no target
//! allow-list.

pub mod headers;
pub mod limits;

pub use headers::{cors_headers, with_cors_headers};
pub use limits::with_body_limit;
