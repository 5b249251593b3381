use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::{error, info};

use cec_reactor::{CecClientSender, Reactor, ReactorError};

mod config;
mod logging;
mod monitor;

use config::Config;
use monitor::CecMonitor;

/// Run the reactor against a live cec-client until the stream ends or Ctrl+C.
///
/// The upstream ending is reported as an error so a supervisor can restart us.
async fn run(config: Config) -> Result<()> {
    let (monitor, stdin, stdout) = CecMonitor::spawn(&config.monitor)?;
    let mut reactor = Reactor::new(config.reactor, CecClientSender::new(stdin));

    info!("Watching CEC traffic...");

    let result = tokio::select! {
        result = reactor.run(BufReader::new(stdout)) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted by user, shutting down...");
            Ok(())
        }
    };

    monitor.shutdown(reactor.sender_mut()).await;

    match result {
        Err(ReactorError::StreamEnded) => {
            Err(anyhow::anyhow!("cec-client output ended unexpectedly"))
        }
        other => other.context("Reactor stopped"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_env().context("Failed to parse configuration")?;

    logging::init_logging(config.log_mode, config.log_level.as_deref())
        .context("Failed to initialize logging")?;

    config.print_summary();

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
