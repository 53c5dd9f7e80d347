use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use rx_relay::config::load_or_default;
use rx_relay::console::{run_interactive, run_script, InquireUi, PlainUi, Session};
use rx_relay::driver::render::{render_log, render_status, render_step, ABOUT};
use rx_relay::driver::{Command, Driver, DriverError};
use rx_relay::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "rx-console")]
#[command(about = "Run the prescription redemption demo steps through the relay", long_about = None)]
struct Cli {
    /// TOML configuration file (driver and steps sections).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Relay invoke endpoint.
    #[arg(short, long)]
    relay: Option<String>,

    /// Remote API base URL. Blank uses the configured default.
    #[arg(short, long)]
    base_url: Option<String>,

    /// Emit tracing output (level from config or RUST_LOG).
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the demo steps
    Steps,
    /// Execute the given steps one after another
    Run {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Execute every step in catalog order
    All,
    /// Show what this client is
    About,
    /// Pick steps and actions from a menu
    Interactive,
    /// Read commands from stdin, one per line; steps overlap
    Script,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(relay) = cli.relay {
        config.driver.relay_url = relay;
    }

    if cli.verbose {
        init_logging(&config.observability)?;
    }

    let driver = Arc::new(Driver::from_config(&config));
    if let Some(base_url) = cli.base_url {
        driver.dispatch(Command::SetBaseUrl(base_url)).await?;
    }

    match cli.command {
        Commands::Steps => {
            for step in driver.snapshot().await.steps {
                println!("{}", render_step(&step));
            }
        }
        Commands::About => println!("{ABOUT}"),
        Commands::Run { keys } => run_steps(&driver, keys).await?,
        Commands::All => {
            let keys = driver.catalog().keys().map(str::to_string).collect();
            run_steps(&driver, keys).await?;
        }
        Commands::Interactive => {
            let mut session = Session::new(driver);
            run_interactive(&mut session, &mut InquireUi).await?;
        }
        Commands::Script => {
            let mut session = Session::new(driver);
            let input = BufReader::new(tokio::io::stdin());
            run_script(&mut session, input, &mut PlainUi).await?;
        }
    }

    Ok(())
}

async fn run_steps(driver: &Driver, keys: Vec<String>) -> Result<(), DriverError> {
    for key in keys {
        let report = driver.run_step(&key).await?;
        println!("{}\n", render_log(&report.entries));
        println!("{}\n", render_status(&driver.snapshot().await.status));
    }
    Ok(())
}
