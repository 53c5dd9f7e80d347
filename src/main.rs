//! Prescription redemption invoke relay.
//!
//! # Architecture Overview
//!
//! ```text
//!     rx-console / browser                  rx-relay                          remote API
//!     ────────────────────     ┌────────────────────────────────────┐
//!   POST /api/invoke           │  request id → trace → CORS → limit │
//!   {baseUrl, path, body} ────▶│            invoke handler          │
//!                              │                 │                  │
//!                              │                 ▼                  │
//!                              │            forwarder ──────────────┼──▶ POST baseUrl+path
//!                              │                 │                  │
//!   200 {ok, awsStatus,   ◀────│  envelope ◀─────┘ ◀────────────────┼─── status + body
//!        awsBody}              └────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use rx_relay::config::load_or_default;
use rx_relay::lifecycle::startup;
use rx_relay::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "rx-relay")]
#[command(about = "Invoke relay for the prescription redemption demo", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!("rx-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        invoke_path = %config.relay.invoke_path,
        upstream_timeout_secs = ?config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
