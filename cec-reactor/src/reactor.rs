//! The event reactor
//!
//! Watches bus traffic for a console becoming Active Source. If the receiver
//! does not announce System Audio Mode within the pending window, the reactor
//! sends a System Audio Mode Request on the display's behalf.
//!
//! All state lives in [`Reactor`] and is only touched from the task running
//! [`Reactor::run`]. Traffic lines and timer expiries are both consumed by
//! that one loop, so transitions are strictly sequential. A timer that was
//! cancelled after its expiry was already queued is recognised by its stale
//! generation and ignored.

use cec_parser::{parse_traffic_line, CecFrame, LogicalAddress, PhysicalAddress};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::ReactorConfig;
use crate::error::{ReactorError, Result};
use crate::rate_limit;
use crate::sender::CommandSender;
use crate::timer::{PendingTimer, TimerExpired};

/// Target used for the raw traffic pass-through
pub const TRAFFIC_TARGET: &str = "cec_traffic";

/// Externally visible reactor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactorStatus {
    /// No correction pending
    Idle,
    /// A correction is armed for the console at `source`
    Pending {
        source: LogicalAddress,
        armed_at: Instant,
    },
}

impl ReactorStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, ReactorStatus::Idle)
    }
}

/// What a single input did to the reactor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Idle -> Pending
    Armed { source: LogicalAddress },
    /// Pending -> Pending, the earlier correction abandoned
    Rearmed {
        previous: LogicalAddress,
        source: LogicalAddress,
    },
    /// Pending -> Idle, the receiver enabled System Audio Mode itself
    Resolved { source: LogicalAddress },
    /// No transition
    Ignored,
    /// Pending -> Idle, corrective command transmitted
    Injected,
    /// Pending -> Idle, corrective command only logged
    DryRun,
    /// Pending -> Idle, corrective command skipped by the rate limit
    Suppressed,
    /// Expiry of a timer that is no longer current; no transition
    Stale,
}

#[derive(Debug)]
struct PendingCorrection {
    source: LogicalAddress,
    physical_address: Option<PhysicalAddress>,
    armed_at: Instant,
    timer: PendingTimer,
}

/// Reacts to bus traffic, owning the pending correction and the rate limit state.
pub struct Reactor<S> {
    config: ReactorConfig,
    sender: S,
    pending: Option<PendingCorrection>,
    last_injection_at: Option<Instant>,
    generation: u64,
    expired_tx: mpsc::UnboundedSender<TimerExpired>,
    expired_rx: mpsc::UnboundedReceiver<TimerExpired>,
}

impl<S: CommandSender> Reactor<S> {
    pub fn new(config: ReactorConfig, sender: S) -> Self {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        Self {
            config,
            sender,
            pending: None,
            last_injection_at: None,
            generation: 0,
            expired_tx,
            expired_rx,
        }
    }

    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    pub fn status(&self) -> ReactorStatus {
        match &self.pending {
            Some(pending) => ReactorStatus::Pending {
                source: pending.source,
                armed_at: pending.armed_at,
            },
            None => ReactorStatus::Idle,
        }
    }

    /// When the last corrective command was sent (or logged, in dry-run mode)
    pub fn last_injection_at(&self) -> Option<Instant> {
        self.last_injection_at
    }

    pub fn sender_mut(&mut self) -> &mut S {
        &mut self.sender
    }

    pub fn into_sender(self) -> S {
        self.sender
    }

    /// Consume traffic lines until the stream ends, handling timer expiries as they arrive.
    ///
    /// Only returns on upstream failure: [`ReactorError::StreamEnded`] when the
    /// reader reaches EOF, [`ReactorError::Io`] when reading fails. Dispatch
    /// failures end their cycle and are logged; the loop keeps going.
    pub async fn run<R>(&mut self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        // Raw segments, decoded lossily: undecodable chatter is not a read error
        let mut lines = reader.split(b'\n');

        loop {
            tokio::select! {
                // Traffic first: a resolving frame already read wins over a simultaneous expiry
                biased;

                line = lines.next_segment() => {
                    match line? {
                        Some(bytes) => {
                            let line = String::from_utf8_lossy(&bytes);
                            self.handle_line(line.trim_end_matches('\r'));
                        }
                        None => {
                            warn!("Traffic stream ended");
                            return Err(ReactorError::StreamEnded);
                        }
                    }
                }

                expired = self.next_expired() => {
                    if let Err(e) = self.handle_timer(expired).await {
                        error!("{}", e);
                    }
                }
            }
        }
    }

    /// Wait for the next queued timer expiry.
    pub async fn next_expired(&mut self) -> TimerExpired {
        match self.expired_rx.recv().await {
            Some(expired) => expired,
            // The reactor holds a sender, so the channel never closes
            None => std::future::pending().await,
        }
    }

    /// Log one raw trace line and feed it to the state machine if it is a frame.
    pub fn handle_line(&mut self, line: &str) -> Option<Outcome> {
        debug!(target: TRAFFIC_TARGET, "{}", line);
        let frame = parse_traffic_line(line)?;
        Some(self.handle_frame(&frame))
    }

    /// Apply one parsed frame.
    pub fn handle_frame(&mut self, frame: &CecFrame) -> Outcome {
        if frame.is_system_audio_on() {
            if frame.source == self.config.receiver && frame.destination.is_broadcast() {
                return self.resolve(frame);
            }

            debug!(
                "Set System Audio Mode on from {} to {}, not the receiver's broadcast; ignoring",
                frame.source, frame.destination
            );
            return Outcome::Ignored;
        }

        if frame.is_active_source() {
            if self.config.is_console(frame.source) {
                return self.arm(frame);
            }

            info!(
                "Active Source from logical {}, not a console; ignoring",
                frame.source
            );
            return Outcome::Ignored;
        }

        debug!("{} from {} to {}", frame.opcode, frame.source, frame.destination);
        Outcome::Ignored
    }

    /// Handle a timer expiry: inject, log (dry run) or suppress, then return to Idle.
    ///
    /// The state is back to Idle before any dispatch error is returned.
    pub async fn handle_timer(&mut self, expired: TimerExpired) -> Result<Outcome> {
        let pending = match self.pending.take() {
            Some(pending) if pending.timer.generation() == expired.generation => pending,
            other => {
                self.pending = other;
                debug!("Ignoring stale timer (generation {})", expired.generation);
                return Ok(Outcome::Stale);
            }
        };

        let now = Instant::now();
        let console = describe(&pending);

        if !rate_limit::allow(now, self.last_injection_at, self.config.min_injection_interval) {
            info!(
                "Pending {} reached timeout, but injection was recent; skipping to avoid spam",
                console
            );
            return Ok(Outcome::Suppressed);
        }

        let command = self.config.corrective_command();

        if self.config.dry_run {
            info!(
                "[DRY RUN] Would send: {} (System Audio Mode Request to receiver {} for TV, {})",
                command, self.config.receiver, console
            );
            self.last_injection_at = Some(now);
            return Ok(Outcome::DryRun);
        }

        info!(
            "Sending: {} (System Audio Mode Request to receiver {} for TV, {})",
            command, self.config.receiver, console
        );
        if let Err(source) = self.sender.send(&command).await {
            return Err(ReactorError::Dispatch { command, source });
        }

        self.last_injection_at = Some(now);
        Ok(Outcome::Injected)
    }

    fn arm(&mut self, frame: &CecFrame) -> Outcome {
        let previous = self.pending.take().map(|previous| {
            previous.timer.cancel();
            previous.source
        });

        let physical_address = frame.active_source_physical_address();
        info!(
            "Playback/console at logical {} became Active Source, phys {}",
            frame.source,
            physical_address.map_or_else(|| "unknown".to_string(), |p| p.to_string())
        );

        self.generation = self.generation.wrapping_add(1);
        let timer = PendingTimer::schedule(
            self.config.pending_window,
            self.generation,
            self.expired_tx.clone(),
        );
        self.pending = Some(PendingCorrection {
            source: frame.source,
            physical_address,
            armed_at: Instant::now(),
            timer,
        });

        match previous {
            Some(previous) => {
                info!(
                    "Abandoned pending correction for logical {}; waiting {:?} for logical {}",
                    previous, self.config.pending_window, frame.source
                );
                Outcome::Rearmed {
                    previous,
                    source: frame.source,
                }
            }
            None => {
                debug!("Waiting {:?} for receiver", self.config.pending_window);
                Outcome::Armed {
                    source: frame.source,
                }
            }
        }
    }

    fn resolve(&mut self, frame: &CecFrame) -> Outcome {
        info!(
            "Detected receiver {} Set System Audio Mode on",
            frame.source
        );

        match self.pending.take() {
            Some(pending) => {
                info!(
                    "Pending {} was satisfied by the receiver; not injecting",
                    describe(&pending)
                );
                let source = pending.source;
                pending.timer.cancel();
                Outcome::Resolved { source }
            }
            None => Outcome::Ignored,
        }
    }
}

fn describe(pending: &PendingCorrection) -> String {
    match pending.physical_address {
        Some(phys) => format!("console LA {} (phys {})", pending.source, phys),
        None => format!("console LA {}", pending.source),
    }
}
