//! Interactive menu: one entry per step, then the page controls.

use std::fmt;

use crate::driver::{DriverView, StepState, StepView};

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Run(StepView),
    SetBaseUrl,
    ShowLog,
    ClearLog,
    About { open: bool },
    Refresh,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Run(step) => {
                write!(f, "▶ {} {} ({})", step.label, step.title, step.path)?;
                match step.state {
                    StepState::Idle => Ok(()),
                    StepState::Sending => write!(f, " [sending]"),
                    StepState::Failed => write!(f, " [failed]"),
                }
            }
            MenuItem::SetBaseUrl => write!(f, "✎ Base URL"),
            MenuItem::ShowLog => write!(f, "☰ Activity log"),
            MenuItem::ClearLog => write!(f, "✕ Clear log"),
            MenuItem::About { open: false } => write!(f, "ⓘ About"),
            MenuItem::About { open: true } => write!(f, "ⓘ Close about"),
            MenuItem::Refresh => write!(f, "↻ Refresh"),
            MenuItem::Quit => write!(f, "Quit"),
        }
    }
}

/// Menu for the current view, steps in catalog order.
pub fn menu_items(view: &DriverView) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = view.steps.iter().cloned().map(MenuItem::Run).collect();
    items.push(MenuItem::SetBaseUrl);
    items.push(MenuItem::ShowLog);
    items.push(MenuItem::ClearLog);
    items.push(MenuItem::About {
        open: view.about_open,
    });
    items.push(MenuItem::Refresh);
    items.push(MenuItem::Quit);
    items
}
