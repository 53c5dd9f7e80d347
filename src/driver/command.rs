//! Commands accepted by the driver's dispatcher.

use std::str::FromStr;

/// Everything an operator can do to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a step's example payload through the relay.
    Execute(String),
    /// Replace the base URL input. Blank means "use the default".
    SetBaseUrl(String),
    /// Drop every log entry and reset the status line.
    ClearLog,
    OpenAbout,
    CloseAbout,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("unknown command '{0}'")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parse one console line: `run <key>`, `base [url]`, `clear`, `about`,
    /// `close`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => Err(ParseCommandError::Empty),
            "run" | "exec" if rest.is_empty() => Err(ParseCommandError::MissingArgument("run")),
            "run" | "exec" => Ok(Command::Execute(rest.to_string())),
            "base" => Ok(Command::SetBaseUrl(rest.to_string())),
            "clear" => Ok(Command::ClearLog),
            "about" => Ok(Command::OpenAbout),
            "close" => Ok(Command::CloseAbout),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}
