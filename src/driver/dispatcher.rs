//! The driver: one dispatcher over commands, owning the log and status.
//!
//! State lives behind a single async mutex that is released while a step's
//! relay call is in flight, so different steps may overlap. A step that is
//! already sending refuses a second `Execute`.

use std::collections::HashMap;

use serde_json::json;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::driver::catalog::{Step, StepCatalog};
use crate::driver::client::{is_success_status, status_text, RelayClient};
use crate::driver::command::Command;
use crate::driver::log::{ActivityLog, LogEntry, LogKind};
use crate::driver::status::StatusLine;
use crate::relay::error::describe;
use crate::relay::InvokeRequest;

/// Per-step button state: `idle → sending → (idle | failed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepState {
    #[default]
    Idle,
    Sending,
    /// Idle again, but the last attempt did not succeed.
    Failed,
}

impl StepState {
    pub fn is_enabled(self) -> bool {
        self != StepState::Sending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("unknown step '{0}'")]
    UnknownStep(String),

    #[error("step '{0}' is already sending")]
    StepBusy(String),
}

/// What a dispatched command ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A non-network command was applied.
    Applied,
    /// The remote answered 2xx.
    Accepted { status: String },
    /// The relay or remote answered with anything else.
    Refused { status: String },
    /// The relay could not be reached or its reply could not be read.
    Unreachable { error: String },
}

/// What one step run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub key: String,
    pub outcome: Outcome,
    /// The request entry and its response or error entry, oldest first.
    pub entries: Vec<LogEntry>,
}

/// Read-only view of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub key: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub path: String,
    pub state: StepState,
    pub enabled: bool,
}

/// Read-only view of the whole driver.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverView {
    pub base_url_input: String,
    pub effective_base_url: String,
    pub status: StatusLine,
    /// Newest first.
    pub log: Vec<LogEntry>,
    pub steps: Vec<StepView>,
    pub about_open: bool,
}

#[derive(Debug)]
struct DriverState {
    base_url_input: String,
    status: StatusLine,
    log: ActivityLog,
    steps: HashMap<String, StepState>,
    about_open: bool,
}

impl DriverState {
    fn step_state(&self, key: &str) -> StepState {
        self.steps.get(key).copied().unwrap_or_default()
    }

    fn effective_base_url(&self, default: &str) -> String {
        match self.base_url_input.trim() {
            "" => default.to_string(),
            trimmed => trimmed.to_string(),
        }
    }
}

pub struct Driver {
    catalog: StepCatalog,
    client: RelayClient,
    default_base_url: String,
    state: Mutex<DriverState>,
}

impl Driver {
    /// The base URL input starts out holding the default.
    pub fn new(catalog: StepCatalog, client: RelayClient, default_base_url: impl Into<String>) -> Self {
        let default_base_url = default_base_url.into();
        Self {
            catalog,
            client,
            state: Mutex::new(DriverState {
                base_url_input: default_base_url.clone(),
                status: StatusLine::ready(),
                log: ActivityLog::new(),
                steps: HashMap::new(),
                about_open: false,
            }),
            default_base_url,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            StepCatalog::from_config(&config.steps),
            RelayClient::new(config.driver.relay_url.clone()),
            config.driver.default_base_url.clone(),
        )
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    /// Where invoke instructions are posted.
    pub fn relay_url(&self) -> &str {
        self.client.relay_url()
    }

    /// Apply one command. `Execute` resolves once the relay call finishes.
    pub async fn dispatch(&self, command: Command) -> Result<Outcome, DriverError> {
        match command {
            Command::Execute(key) => self.run_step(&key).await.map(|report| report.outcome),
            Command::SetBaseUrl(text) => {
                self.state.lock().await.base_url_input = text;
                Ok(Outcome::Applied)
            }
            Command::ClearLog => {
                let mut state = self.state.lock().await;
                state.log.clear();
                state.status = StatusLine::ready();
                Ok(Outcome::Applied)
            }
            Command::OpenAbout => {
                self.state.lock().await.about_open = true;
                Ok(Outcome::Applied)
            }
            Command::CloseAbout => {
                self.state.lock().await.about_open = false;
                Ok(Outcome::Applied)
            }
        }
    }

    /// Send one step through the relay and report what it logged.
    pub async fn run_step(&self, key: &str) -> Result<StepReport, DriverError> {
        let step = self
            .catalog
            .get(key)
            .ok_or_else(|| DriverError::UnknownStep(key.to_string()))?;

        let (base_url, sent) = self.begin(step).await?;
        let request = InvokeRequest::new(base_url, step.path.clone(), step.example_body.clone());

        let result = self.client.invoke(&request).await;

        let mut state = self.state.lock().await;
        let (outcome, next, received) = match result {
            Ok(result) => {
                let (status, body) = result.unwrap_remote();
                let text = status_text(&status);
                let entry = LogEntry::new(
                    LogKind::Response,
                    format!("Response: {}", step.title),
                    format!("HTTP {text}"),
                    json!({ "response": body, "awsStatus": status.clone() }),
                );

                if is_success_status(&status) {
                    state.status = StatusLine::accepted();
                    (Outcome::Accepted { status: text }, StepState::Idle, entry)
                } else {
                    state.status = StatusLine::failed();
                    (Outcome::Refused { status: text }, StepState::Failed, entry)
                }
            }
            Err(e) => {
                let error = describe(&e);
                let entry = LogEntry::new(
                    LogKind::Error,
                    format!("Error: {}", step.title),
                    "NETWORK",
                    json!({ "error": error }),
                );
                state.status = StatusLine::failed();
                (Outcome::Unreachable { error }, StepState::Failed, entry)
            }
        };
        state.log.prepend(received.clone());
        state.steps.insert(step.key.clone(), next);
        drop(state);

        tracing::info!(step = %step.key, outcome = ?outcome, "Step finished");
        Ok(StepReport {
            key: step.key.clone(),
            outcome,
            entries: vec![sent, received],
        })
    }

    /// Mark the step as sending and record the outgoing request.
    /// Returns the base URL to use and the logged request entry.
    async fn begin(&self, step: &Step) -> Result<(String, LogEntry), DriverError> {
        let mut state = self.state.lock().await;
        if state.step_state(&step.key) == StepState::Sending {
            return Err(DriverError::StepBusy(step.key.clone()));
        }

        state.steps.insert(step.key.clone(), StepState::Sending);
        let sent = LogEntry::new(
            LogKind::Request,
            format!("Request sent: {}", step.title),
            format!("{} {}", step.method, step.path),
            json!({ "request": step.example_body }),
        );
        state.log.prepend(sent.clone());
        state.status = StatusLine::sending(&step.title);

        let base_url = state.effective_base_url(&self.default_base_url);
        tracing::debug!(step = %step.key, base_url = %base_url, "Step sending");
        Ok((base_url, sent))
    }

    pub async fn snapshot(&self) -> DriverView {
        let state = self.state.lock().await;
        DriverView {
            base_url_input: state.base_url_input.clone(),
            effective_base_url: state.effective_base_url(&self.default_base_url),
            status: state.status.clone(),
            log: state.log.entries().cloned().collect(),
            steps: self
                .catalog
                .iter()
                .map(|step| {
                    let current = state.step_state(&step.key);
                    StepView {
                        key: step.key.clone(),
                        label: step.label.clone(),
                        title: step.title.clone(),
                        description: step.description.clone(),
                        path: step.path.clone(),
                        state: current,
                        enabled: current.is_enabled(),
                    }
                })
                .collect(),
            about_open: state.about_open,
        }
    }
}
