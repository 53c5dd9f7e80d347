//! Prompt seam between the console session and the terminal.

use inquire::{InquireError, Select, Text};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("prompt failed: {0}")]
    Prompt(#[from] InquireError),

    #[error("failed to read commands: {0}")]
    Input(#[from] std::io::Error),
}

/// What the session needs from a terminal. Prompts block the caller.
///
/// `None` from a prompt means the operator cancelled it.
pub trait ConsoleUi {
    fn print(&mut self, message: &str);
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>, ConsoleError>;
    /// `current` is shown for reference, not pre-filled.
    fn input(&mut self, prompt: &str, current: &str) -> Result<Option<String>, ConsoleError>;
}

/// Interactive terminal prompts.
pub struct InquireUi;

impl ConsoleUi for InquireUi {
    fn print(&mut self, message: &str) {
        println!("{message}");
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>, ConsoleError> {
        match Select::new(prompt, items.to_vec()).with_page_size(10).prompt() {
            Ok(choice) => Ok(items.iter().position(|item| item == &choice)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    fn input(&mut self, prompt: &str, current: &str) -> Result<Option<String>, ConsoleError> {
        let help = format!("current: {current}");
        match Text::new(prompt).with_help_message(&help).prompt() {
            Ok(value) => Ok(Some(value)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }
}

/// Line output without prompts, for piped command scripts.
pub struct PlainUi;

impl ConsoleUi for PlainUi {
    fn print(&mut self, message: &str) {
        println!("{message}");
    }

    fn select(&mut self, _prompt: &str, _items: &[String]) -> Result<Option<usize>, ConsoleError> {
        Ok(None)
    }

    fn input(&mut self, _prompt: &str, _current: &str) -> Result<Option<String>, ConsoleError> {
        Ok(None)
    }
}
