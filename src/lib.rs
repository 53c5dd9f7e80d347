//! Prescription redemption demo: invoke relay and step driver.

pub mod config;
pub mod console;
pub mod driver;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod security;

pub use config::AppConfig;
pub use driver::Driver;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
