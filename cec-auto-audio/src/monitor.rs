//! The `cec-client` child process
//!
//! One interactive `cec-client` is both the traffic source (stdout) and the
//! transmit facility (stdin).

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use cec_reactor::CommandSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

/// Grace period for cec-client to exit after `q` before it is killed
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// How to launch the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub program: PathBuf,
    /// Value for `-d`; 8 restricts output to bus traffic
    pub debug_level: u8,
}

/// A running cec-client whose pipes have been handed out
pub struct CecMonitor {
    child: Child,
}

impl CecMonitor {
    /// Spawn cec-client and return it along with its stdin and stdout.
    ///
    /// stderr is forwarded to the log in the background.
    pub fn spawn(config: &MonitorConfig) -> Result<(Self, ChildStdin, ChildStdout)> {
        let mut child = Command::new(&config.program)
            .arg("-d")
            .arg(config.debug_level.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn {}", config.program.display()))?;

        let stdin = child.stdin.take().context("Failed to open cec-client stdin")?;
        let stdout = child.stdout.take().context("Failed to open cec-client stdout")?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("cec-client: {}", line);
                }
            });
        }

        info!(
            "Spawned: {} -d {}",
            config.program.display(),
            config.debug_level
        );

        Ok((Self { child }, stdin, stdout))
    }

    /// Ask cec-client to quit through `sender`, killing it if it does not exit in time.
    pub async fn shutdown<S: CommandSender>(mut self, sender: &mut S) {
        if let Err(e) = sender.send("q").await {
            debug!("Could not send quit to cec-client: {}", e);
        }

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, self.child.wait()).await {
            Ok(Ok(status)) => debug!("cec-client exited with {}", status),
            Ok(Err(e)) => warn!("Failed to wait for cec-client: {}", e),
            Err(_) => {
                warn!("cec-client did not exit within {:?}; killing it", SHUTDOWN_TIMEOUT);
                if let Err(e) = self.child.kill().await {
                    warn!("Failed to kill cec-client: {}", e);
                }
            }
        }

        info!("cec-client terminated");
    }
}
