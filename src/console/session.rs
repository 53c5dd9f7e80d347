//! A console session over a shared driver.
//!
//! Steps run as background tasks so the operator keeps control while a
//! relay call is in flight. Finished steps are reported before the next
//! prompt, or when the session waits for them.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{block_in_place, JoinError, JoinSet};

use crate::console::menu::{menu_items, MenuItem};
use crate::console::ui::{ConsoleError, ConsoleUi};
use crate::driver::render::{render_log, render_status, render_view, ABOUT};
use crate::driver::{Command, Driver, DriverError, StepReport};

pub type StepResult = Result<StepReport, DriverError>;

pub struct Session {
    driver: Arc<Driver>,
    running: JoinSet<StepResult>,
}

impl Session {
    pub fn new(driver: Arc<Driver>) -> Self {
        Self {
            driver,
            running: JoinSet::new(),
        }
    }

    pub fn driver(&self) -> &Arc<Driver> {
        &self.driver
    }

    /// Steps launched and not yet collected.
    pub fn in_flight(&self) -> usize {
        self.running.len()
    }

    /// Start a step without waiting for its relay call.
    pub fn launch(&mut self, key: &str) -> Result<(), DriverError> {
        if self.driver.catalog().get(key).is_none() {
            return Err(DriverError::UnknownStep(key.to_string()));
        }

        let driver = self.driver.clone();
        let key = key.to_string();
        self.running.spawn(async move { driver.run_step(&key).await });
        Ok(())
    }

    /// Apply a command. `Execute` is launched in the background; everything
    /// else completes before this returns.
    pub async fn apply(&mut self, command: Command) -> Result<(), DriverError> {
        match command {
            Command::Execute(key) => self.launch(&key),
            other => self.driver.dispatch(other).await.map(|_| ()),
        }
    }

    /// Results of steps that finished since the last collection.
    pub fn finished(&mut self) -> Vec<StepResult> {
        let mut done = Vec::new();
        while let Some(joined) = self.running.try_join_next() {
            collect(joined, &mut done);
        }
        done
    }

    /// Wait for every running step.
    pub async fn finish(&mut self) -> Vec<StepResult> {
        let mut done = Vec::new();
        while let Some(joined) = self.running.join_next().await {
            collect(joined, &mut done);
        }
        done
    }

    /// Apply a command, printing any refusal.
    async fn apply_or_print(&mut self, command: Command, ui: &mut dyn ConsoleUi) {
        if let Err(e) = self.apply(command).await {
            ui.print(&e.to_string());
        }
    }

    async fn report(&self, results: Vec<StepResult>, ui: &mut dyn ConsoleUi) {
        if results.is_empty() {
            return;
        }
        for result in results {
            match result {
                Ok(report) => ui.print(&format!("{}\n", render_log(&report.entries))),
                Err(e) => ui.print(&e.to_string()),
            }
        }
        ui.print(&render_status(&self.driver.snapshot().await.status));
    }

    async fn settle(&mut self, ui: &mut dyn ConsoleUi) {
        let pending = self.in_flight();
        if pending > 0 {
            ui.print(&format!("Waiting for {pending} step(s) to finish..."));
        }
        let results = self.finish().await;
        self.report(results, ui).await;
    }
}

fn collect(joined: Result<StepResult, JoinError>, done: &mut Vec<StepResult>) {
    match joined {
        Ok(result) => done.push(result),
        Err(e) => tracing::error!(error = %e, "Step task did not complete"),
    }
}

/// Menu-driven session. Prompts block, so this needs the multi-threaded
/// runtime.
pub async fn run_interactive(
    session: &mut Session,
    ui: &mut dyn ConsoleUi,
) -> Result<(), ConsoleError> {
    ui.print(&format!("Relay: {}", session.driver().relay_url()));
    ui.print(&render_view(&session.driver().snapshot().await));

    loop {
        let finished = session.finished();
        session.report(finished, ui).await;

        let view = session.driver().snapshot().await;
        let items = menu_items(&view);
        let labels: Vec<String> = items.iter().map(ToString::to_string).collect();
        let prompt = view.status.message.clone();

        let Some(index) = block_in_place(|| ui.select(&prompt, &labels))? else {
            break;
        };
        let Some(choice) = items.into_iter().nth(index) else {
            continue;
        };

        match choice {
            MenuItem::Run(step) => match session.launch(&step.key) {
                Ok(()) => ui.print(&format!("Sending: {}...", step.title)),
                Err(e) => ui.print(&e.to_string()),
            },
            MenuItem::SetBaseUrl => {
                let current = view.effective_base_url.clone();
                if let Some(text) = block_in_place(|| ui.input("Base URL (blank for default)", &current))? {
                    session.apply_or_print(Command::SetBaseUrl(text), ui).await;
                    let view = session.driver().snapshot().await;
                    ui.print(&format!("Base URL: {}", view.effective_base_url));
                }
            }
            MenuItem::ShowLog if view.log.is_empty() => ui.print("Activity log is empty."),
            MenuItem::ShowLog => ui.print(&render_log(&view.log)),
            MenuItem::ClearLog => {
                session.apply_or_print(Command::ClearLog, ui).await;
                ui.print(&render_status(&session.driver().snapshot().await.status));
            }
            MenuItem::About { open: false } => {
                session.apply_or_print(Command::OpenAbout, ui).await;
                ui.print(ABOUT);
            }
            MenuItem::About { open: true } => session.apply_or_print(Command::CloseAbout, ui).await,
            MenuItem::Refresh => ui.print(&render_view(&view)),
            MenuItem::Quit => break,
        }
    }

    session.settle(ui).await;
    Ok(())
}

/// Line-driven session for piped input.
///
/// Accepts the [`Command`] syntax, a bare step key, and `status`, `log`,
/// `steps`, `wait` and `quit`. Blank lines and `#` comments are skipped.
pub async fn run_script<R>(
    session: &mut Session,
    input: R,
    ui: &mut dyn ConsoleUi,
) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let finished = session.finished();
        session.report(finished, ui).await;

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "wait" => {
                let results = session.finish().await;
                session.report(results, ui).await;
            }
            "status" => ui.print(&render_status(&session.driver().snapshot().await.status)),
            "log" => ui.print(&render_log(&session.driver().snapshot().await.log)),
            "steps" => ui.print(&render_view(&session.driver().snapshot().await)),
            key if session.driver().catalog().get(key).is_some() => {
                if let Err(e) = session.launch(key) {
                    ui.print(&e.to_string());
                }
            }
            other => match other.parse::<Command>() {
                Ok(Command::OpenAbout) => {
                    session.apply_or_print(Command::OpenAbout, ui).await;
                    ui.print(ABOUT);
                }
                Ok(command) => session.apply_or_print(command, ui).await,
                Err(e) => ui.print(&e.to_string()),
            },
        }
    }

    session.settle(ui).await;
    Ok(())
}
