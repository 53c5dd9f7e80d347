//! Terminal rendering of the driver view for the console.

use colored::{Color, Colorize};

use crate::driver::dispatcher::{DriverView, StepState, StepView};
use crate::driver::log::{LogEntry, LogKind};
use crate::driver::status::{StatusLine, StatusTone};

pub const ABOUT: &str = "\
Prescription redemption demo client.
Each step sends a fixed example payload to the remote API through the
invoke relay and shows what was sent and what came back. The client holds
no business rules; everything it shows comes from the remote service.";

pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Info => Color::Cyan,
        StatusTone::Ok => Color::Green,
        StatusTone::Error => Color::Red,
    }
}

/// Colour for an HTTP status code.
pub fn status_color(status: u16) -> Color {
    if status >= 400 {
        Color::Red
    } else if status >= 300 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Response metas carry `HTTP <status>`; anything unparseable is yellow.
fn meta_color(entry: &LogEntry) -> Color {
    match entry.kind {
        LogKind::Request => Color::Cyan,
        LogKind::Error => Color::Red,
        LogKind::Response => entry
            .meta
            .strip_prefix("HTTP ")
            .and_then(|code| code.parse::<u16>().ok())
            .map(status_color)
            .unwrap_or(Color::Yellow),
    }
}

pub fn render_status(status: &StatusLine) -> String {
    status.message.color(tone_color(status.tone)).to_string()
}

pub fn step_state_text(state: StepState) -> String {
    match state {
        StepState::Idle => "ready".green().to_string(),
        StepState::Sending => "sending".yellow().to_string(),
        StepState::Failed => "failed".red().to_string(),
    }
}

pub fn render_step(step: &StepView) -> String {
    format!(
        "{:<8} {:<7} {} ({}) [{}]\n         {}",
        step.key.bold(),
        step.label,
        step.title,
        step.path.cyan(),
        step_state_text(step.state),
        step.description.dimmed()
    )
}

pub fn render_entry(entry: &LogEntry) -> String {
    let payload = serde_json::to_string_pretty(&entry.payload)
        .unwrap_or_else(|_| entry.payload.to_string());
    format!(
        "{}\n{} | {}\n{}",
        entry.title.bold(),
        entry.timestamp_text().dimmed(),
        entry.meta.color(meta_color(entry)),
        payload
    )
}

/// Entries in the order given, separated by blank lines.
pub fn render_log<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> String {
    entries
        .into_iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_view(view: &DriverView) -> String {
    let mut sections = vec![format!("{} {}", "Base URL:".bold(), view.effective_base_url)];
    sections.extend(view.steps.iter().map(render_step));
    sections.push(render_status(&view.status));
    if view.about_open {
        sections.push(format!("\n{ABOUT}"));
    }
    if !view.log.is_empty() {
        sections.push(format!("\n{}", render_log(&view.log)));
    }
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::status::StatusLine;
    use serde_json::json;

    #[test]
    fn entry_shows_title_meta_and_pretty_payload() {
        let entry = LogEntry::new(
            LogKind::Response,
            "Response: Emit prescription",
            "HTTP 202",
            json!({"response": {"transactionId": "tx-1"}, "awsStatus": 202}),
        );
        let text = render_entry(&entry);
        assert!(text.lines().next().is_some_and(|l| l.contains("Response: Emit prescription")));
        assert!(text.contains("HTTP 202"));
        assert!(text.contains("\"transactionId\": \"tx-1\""));
    }

    #[test]
    fn status_keeps_its_message() {
        assert!(render_status(&StatusLine::accepted()).contains("Request accepted ✅"));
        assert!(render_status(&StatusLine::failed()).contains("Please try again."));
    }

    #[test]
    fn tones_map_to_colours() {
        assert_eq!(tone_color(StatusTone::Ok), Color::Green);
        assert_eq!(tone_color(StatusTone::Error), Color::Red);
        assert_eq!(tone_color(StatusTone::Info), Color::Cyan);
    }

    #[test]
    fn meta_is_coloured_by_status() {
        let response = |meta: &str| LogEntry::new(LogKind::Response, "r", meta, json!({}));
        assert_eq!(meta_color(&response("HTTP 202")), Color::Green);
        assert_eq!(meta_color(&response("HTTP 302")), Color::Yellow);
        assert_eq!(meta_color(&response("HTTP 404")), Color::Red);
        assert_eq!(meta_color(&response("HTTP 500")), Color::Red);
        assert_eq!(meta_color(&response("HTTP accepted")), Color::Yellow);

        let error = LogEntry::new(LogKind::Error, "e", "NETWORK", json!({}));
        assert_eq!(meta_color(&error), Color::Red);
    }

    #[test]
    fn view_lists_base_url_steps_status_then_log() {
        let view = DriverView {
            base_url_input: String::new(),
            effective_base_url: "http://remote/prod".into(),
            status: StatusLine::failed(),
            log: vec![LogEntry::new(LogKind::Error, "Error: Check stock", "NETWORK", json!({}))],
            steps: Vec::new(),
            about_open: true,
        };
        let text = render_view(&view);

        let base = text.find("http://remote/prod").unwrap();
        let status = text.find("Please try again.").unwrap();
        let about = text.find("Prescription redemption demo client.").unwrap();
        let entry = text.find("Error: Check stock").unwrap();
        assert!(base < status && status < about && about < entry);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn step_line_shows_state() {
        let step = StepView {
            key: "emit".into(),
            label: "STEP 1".into(),
            title: "Emit prescription".into(),
            description: "Registers a prescription.".into(),
            path: "/prescriptions/emit".into(),
            state: StepState::Sending,
            enabled: false,
        };
        assert!(render_step(&step).contains("sending"));
    }
}
