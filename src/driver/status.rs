//! One-line status banner.

pub const READY: &str = "Select an action to begin.";
pub const ACCEPTED: &str = "Request accepted ✅";
pub const FAILED: &str = "Could not complete the request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub tone: StatusTone,
}

impl StatusLine {
    pub fn ready() -> Self {
        Self::info(READY)
    }

    pub fn sending(title: &str) -> Self {
        Self::info(format!("Sending: {title}..."))
    }

    pub fn accepted() -> Self {
        Self {
            message: ACCEPTED.to_string(),
            tone: StatusTone::Ok,
        }
    }

    pub fn failed() -> Self {
        Self {
            message: FAILED.to_string(),
            tone: StatusTone::Error,
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: StatusTone::Info,
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::ready()
    }
}
