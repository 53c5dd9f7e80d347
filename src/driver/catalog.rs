//! Immutable demo step catalog.

use std::sync::Arc;

use serde_json::Value;

use crate::config::StepConfig;

/// One predefined demo action.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub key: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub method: String,
    pub path: String,
    pub example_body: Value,
}

impl From<StepConfig> for Step {
    fn from(config: StepConfig) -> Self {
        Self {
            key: config.key,
            label: config.label,
            title: config.title,
            description: config.description,
            method: config.method,
            path: config.path,
            example_body: config.example_body,
        }
    }
}

/// Ordered, read-only list of steps, shared by reference.
#[derive(Debug, Clone)]
pub struct StepCatalog {
    steps: Arc<[Step]>,
}

impl StepCatalog {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    pub fn from_config(steps: &[StepConfig]) -> Self {
        Self::new(steps.iter().cloned().map(Step::from).collect())
    }

    pub fn get(&self, key: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.key.as_str())
    }
}
