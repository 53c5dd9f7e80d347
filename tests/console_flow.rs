//! Console sessions against a live relay and stub remote.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rx_relay::config::schema::default_steps;
use rx_relay::console::{run_interactive, run_script, ConsoleError, ConsoleUi, Session};
use rx_relay::driver::{Driver, LogKind, Outcome, RelayClient, StepCatalog, StepState};

mod common;

fn session(relay: SocketAddr, remote_base: String) -> Session {
    Session::new(Arc::new(Driver::new(
        StepCatalog::from_config(&default_steps()),
        RelayClient::with_client(common::client(), format!("http://{relay}/api/invoke")),
        remote_base,
    )))
}

/// Records output and answers prompts from a script.
#[derive(Default)]
struct ScriptedUi {
    printed: Vec<String>,
    /// Each pick selects the first menu label containing the text.
    picks: VecDeque<&'static str>,
    inputs: VecDeque<String>,
}

impl ScriptedUi {
    fn output(&self) -> String {
        self.printed.join("\n")
    }
}

impl ConsoleUi for ScriptedUi {
    fn print(&mut self, message: &str) {
        self.printed.push(message.to_string());
    }

    fn select(&mut self, _prompt: &str, items: &[String]) -> Result<Option<usize>, ConsoleError> {
        Ok(self
            .picks
            .pop_front()
            .and_then(|pick| items.iter().position(|item| item.contains(pick))))
    }

    fn input(&mut self, _prompt: &str, _current: &str) -> Result<Option<String>, ConsoleError> {
        Ok(self.inputs.pop_front())
    }
}

async fn wait_for_calls(calls: &std::sync::Mutex<Vec<common::Captured>>, count: usize, within: Duration) -> bool {
    let deadline = Instant::now() + within;
    while Instant::now() < deadline {
        if calls.lock().unwrap().len() >= count {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn test_second_step_starts_while_first_is_in_flight() {
    let (remote, calls) = common::start_stub_remote(200, r#"{"ok":true}"#, Duration::from_millis(1500)).await;
    let (relay, _shutdown) = common::start_relay().await;
    let mut session = session(relay, format!("http://{remote}"));

    session.launch("emit").unwrap();
    assert!(wait_for_calls(&calls, 1, Duration::from_secs(1)).await);

    session.launch("search").unwrap();
    assert!(
        wait_for_calls(&calls, 2, Duration::from_millis(700)).await,
        "search must reach the remote before emit's reply"
    );

    let view = session.driver().snapshot().await;
    let state = |key: &str| view.steps.iter().find(|s| s.key == key).unwrap().state;
    assert_eq!(state("emit"), StepState::Sending);
    assert_eq!(state("search"), StepState::Sending);
    assert_eq!(session.in_flight(), 2);

    let results = session.finish().await;
    assert_eq!(results.len(), 2);
    for result in results {
        let report = result.unwrap();
        assert_eq!(report.outcome, Outcome::Accepted { status: "200".into() });
        assert_eq!(report.entries[0].kind, LogKind::Request);
        assert_eq!(report.entries[1].kind, LogKind::Response);
    }
}

#[tokio::test]
async fn test_script_steps_overlap() {
    let delay = Duration::from_millis(700);
    let (remote, calls) = common::start_stub_remote(202, r#"{"transactionId":"tx-1"}"#, delay).await;
    let (relay, _shutdown) = common::start_relay().await;
    let mut session = session(relay, format!("http://{remote}"));
    let mut ui = ScriptedUi::default();

    let started = Instant::now();
    run_script(&mut session, &b"run emit\nrun search\n"[..], &mut ui)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(calls.lock().unwrap().len(), 2);
    assert!(elapsed < delay * 2, "steps ran back to back: {elapsed:?}");

    let output = ui.output();
    assert!(output.contains("Response: Emit prescription"));
    assert!(output.contains("Response: Search pharmacies"));
}

#[tokio::test]
async fn test_script_refuses_a_step_already_sending() {
    let (remote, calls) = common::start_stub_remote(200, "{}", Duration::from_millis(400)).await;
    let (relay, _shutdown) = common::start_relay().await;
    let mut session = session(relay, format!("http://{remote}"));
    let mut ui = ScriptedUi::default();

    run_script(&mut session, &b"emit\nrun emit\n"[..], &mut ui)
        .await
        .unwrap();

    assert_eq!(calls.lock().unwrap().len(), 1);
    assert!(ui.output().contains("step 'emit' is already sending"));
}

#[tokio::test]
async fn test_script_reports_bad_lines_and_keeps_going() {
    let (remote, calls) = common::start_stub_remote(200, "{}", Duration::ZERO).await;
    let (relay, _shutdown) = common::start_relay().await;
    let mut session = session(relay, format!("http://{remote}"));
    let mut ui = ScriptedUi::default();

    let script = b"# warm up\ndance\nrun refund\ncheck\nwait\nstatus\n";
    run_script(&mut session, &script[..], &mut ui).await.unwrap();

    let output = ui.output();
    assert!(output.contains("unknown command 'dance'"));
    assert!(output.contains("unknown step 'refund'"));
    assert!(output.contains("Response: Check stock"));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_menu_sets_base_url_then_runs_step() {
    let (remote, calls) = common::start_stub_remote(202, r#"{"transactionId":"tx-7"}"#, Duration::ZERO).await;
    let (relay, _shutdown) = common::start_relay().await;
    let mut session = session(relay, "http://127.0.0.1:1".into());
    let mut ui = ScriptedUi {
        picks: VecDeque::from(["Base URL", "Emit prescription", "About", "Quit"]),
        inputs: VecDeque::from([format!("http://{remote}/prod")]),
        ..ScriptedUi::default()
    };

    run_interactive(&mut session, &mut ui).await.unwrap();

    assert_eq!(calls.lock().unwrap()[0].path, "/prod/prescriptions/emit");
    let output = ui.output();
    assert!(output.contains(&format!("Relay: http://{relay}/api/invoke")));
    assert!(output.contains(&format!("Base URL: http://{remote}/prod")));
    assert!(output.contains("Sending: Emit prescription..."));
    assert!(output.contains("Prescription redemption demo client."));
    assert!(output.contains("tx-7"));
    assert!(session.driver().snapshot().await.about_open);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cancelled_menu_still_waits_for_running_steps() {
    let (remote, calls) = common::start_stub_remote(404, r#"{"message":"no stock"}"#, Duration::from_millis(300)).await;
    let (relay, _shutdown) = common::start_relay().await;
    let mut session = session(relay, format!("http://{remote}"));
    let mut ui = ScriptedUi {
        picks: VecDeque::from(["Check stock"]),
        ..ScriptedUi::default()
    };

    run_interactive(&mut session, &mut ui).await.unwrap();

    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(session.in_flight(), 0);
    let output = ui.output();
    assert!(output.contains("Waiting for 1 step(s) to finish..."));
    assert!(output.contains("HTTP 404"));
}
