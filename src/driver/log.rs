//! Newest-first activity log.

use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Request,
    Response,
    Error,
}

/// A single immutable log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: LogKind,
    pub title: String,
    pub meta: String,
    pub payload: Value,
}

impl LogEntry {
    pub fn new(kind: LogKind, title: impl Into<String>, meta: impl Into<String>, payload: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            title: title.into(),
            meta: meta.into(),
            payload,
        }
    }

    /// ISO-8601 timestamp with millisecond precision.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Grows only at the front; cleared wholesale.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
