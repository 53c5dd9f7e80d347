//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (bind address parses, paths are rooted)
//! - Detect duplicate step keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// Route served by the liveness probe.
pub const HEALTH_PATH: &str = "/health";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("relay.invoke_path '{0}' must start with '/'")]
    InvokePath(String),

    #[error("relay.invoke_path '{0}' collides with the health route")]
    InvokePathReserved(String),

    #[error("relay.max_body_size must be greater than zero")]
    BodyLimit,

    #[error("timeouts.upstream_secs must be greater than zero when set")]
    UpstreamTimeout,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("driver.relay_url must not be empty")]
    RelayUrl,

    #[error("at least one step must be configured")]
    NoSteps,

    #[error("step #{0} has an empty key")]
    EmptyStepKey(usize),

    #[error("step key '{0}' is defined more than once")]
    DuplicateStepKey(String),

    #[error("step '{key}' path '{path}' must start with '/'")]
    StepPath { key: String, path: String },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if !config.relay.invoke_path.starts_with('/') {
        errors.push(ValidationError::InvokePath(config.relay.invoke_path.clone()));
    } else if config.relay.invoke_path == HEALTH_PATH {
        errors.push(ValidationError::InvokePathReserved(config.relay.invoke_path.clone()));
    }

    if config.relay.max_body_size == 0 {
        errors.push(ValidationError::BodyLimit);
    }

    if config.timeouts.upstream_secs == Some(0) {
        errors.push(ValidationError::UpstreamTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.driver.relay_url.trim().is_empty() {
        errors.push(ValidationError::RelayUrl);
    }

    if config.steps.is_empty() {
        errors.push(ValidationError::NoSteps);
    }

    let mut seen = HashSet::new();
    for (index, step) in config.steps.iter().enumerate() {
        if step.key.trim().is_empty() {
            errors.push(ValidationError::EmptyStepKey(index + 1));
        } else if !seen.insert(step.key.as_str()) {
            errors.push(ValidationError::DuplicateStepKey(step.key.clone()));
        }

        if !step.path.starts_with('/') {
            errors.push(ValidationError::StepPath {
                key: step.key.clone(),
                path: step.path.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
