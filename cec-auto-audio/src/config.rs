//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use cec_parser::LogicalAddress;
use cec_reactor::ReactorConfig;
use clap::Parser;
use tracing::info;

use crate::logging::LoggingMode;
use crate::monitor::MonitorConfig;

/// CEC auto-audio helper
///
/// Watches HDMI-CEC traffic through cec-client. When a console becomes the
/// active source and the audio receiver does not turn on System Audio Mode by
/// itself, sends a System Audio Mode Request on the TV's behalf.
#[derive(Parser, Debug)]
#[command(name = "cec-auto-audio")]
#[command(version)]
pub struct Args {
    /// Logical address (hex) of a console or other playback device; repeatable
    #[arg(
        short,
        long = "console",
        value_name = "LA",
        env = "CEC_AUTO_AUDIO_CONSOLES",
        value_delimiter = ',',
        default_values = ["4", "8", "b"]
    )]
    pub consoles: Vec<LogicalAddress>,

    /// Logical address (hex) of the audio receiver
    #[arg(
        short,
        long,
        value_name = "LA",
        env = "CEC_AUTO_AUDIO_RECEIVER",
        default_value = "5"
    )]
    pub receiver: LogicalAddress,

    /// Logical address (hex) cec-client registers as and transmits from
    #[arg(long, value_name = "LA", env = "CEC_AUTO_AUDIO_CLIENT", default_value = "1")]
    pub client: LogicalAddress,

    /// How long to wait for the receiver before injecting, in milliseconds
    #[arg(
        short = 'w',
        long,
        env = "CEC_AUTO_AUDIO_PENDING_WINDOW_MS",
        default_value_t = 500
    )]
    pub pending_window_ms: u64,

    /// Minimum gap between injections, in milliseconds
    #[arg(
        short = 'i',
        long,
        env = "CEC_AUTO_AUDIO_MIN_INTERVAL_MS",
        default_value_t = 3000
    )]
    pub min_interval_ms: u64,

    /// Log the corrective command instead of sending it
    #[arg(short = 'n', long, env = "CEC_AUTO_AUDIO_DRY_RUN")]
    pub dry_run: bool,

    /// cec-client executable
    #[arg(long, env = "CEC_AUTO_AUDIO_CEC_CLIENT", default_value = "cec-client")]
    pub cec_client: PathBuf,

    /// cec-client log level mask (8 = traffic only)
    #[arg(long, env = "CEC_AUTO_AUDIO_CEC_DEBUG_LEVEL", default_value_t = 8)]
    pub cec_debug_level: u8,

    /// Log output style
    #[arg(
        long,
        value_enum,
        env = "CEC_AUTO_AUDIO_LOG_MODE",
        default_value = "development"
    )]
    pub log_mode: LoggingMode,

    /// Log filter (error, warn, info, debug, trace, or an EnvFilter directive)
    #[arg(short, long, env = "CEC_AUTO_AUDIO_LOG")]
    pub log_level: Option<String>,
}

/// Configuration assembled from the command line, fixed for the process lifetime
#[derive(Debug, Clone)]
pub struct Config {
    pub reactor: ReactorConfig,
    pub monitor: MonitorConfig,
    pub log_mode: LoggingMode,
    pub log_level: Option<String>,
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        let reactor = ReactorConfig::new()
            .with_consoles(args.consoles)
            .with_receiver(args.receiver)
            .with_client(args.client)
            .with_pending_window(Duration::from_millis(args.pending_window_ms))
            .with_min_injection_interval(Duration::from_millis(args.min_interval_ms))
            .with_dry_run(args.dry_run);
        reactor.validate().context("Invalid reactor configuration")?;

        if args.cec_client.as_os_str().is_empty() {
            anyhow::bail!("cec-client path must not be empty");
        }

        Ok(Self {
            reactor,
            monitor: MonitorConfig {
                program: args.cec_client,
                debug_level: args.cec_debug_level,
            },
            log_mode: args.log_mode,
            log_level: args.log_level,
        })
    }
}

impl Config {
    /// Parse the process arguments and environment
    pub fn from_env() -> Result<Self> {
        Self::try_from(Args::parse())
    }

    /// Log the startup banner and configuration summary
    pub fn print_summary(&self) {
        let consoles = self
            .reactor
            .consoles
            .iter()
            .map(|la| format!("0x{la}"))
            .collect::<Vec<_>>()
            .join(", ");

        info!("Starting CEC auto-audio helper");
        info!("Dry run: {}", self.reactor.dry_run);
        info!("Strategy:");
        info!("  - Watch for Active Source from consoles [{}]", consoles);
        info!(
            "  - Give receiver 0x{} {:?} to send Set System Audio Mode (on) itself",
            self.reactor.receiver, self.reactor.pending_window
        );
        info!(
            "  - Otherwise send: {} (at most once every {:?})",
            self.reactor.corrective_command(),
            self.reactor.min_injection_interval
        );
    }
}
