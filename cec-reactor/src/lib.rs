//! # CEC Reactor
//!
//! Requests HDMI-CEC System Audio Mode when a console becomes the active input
//! and the audio receiver does not enable it on its own.
//!
//! ## Overview
//!
//! The reactor reads `cec-client` traffic lines, parses them into frames and
//! drives a two-state machine:
//!
//! - **Idle**: waiting for a configured console to broadcast Active Source
//! - **Pending**: a correction is armed for the pending window; the receiver
//!   may still resolve it by broadcasting Set System Audio Mode (on)
//!
//! When the window elapses the reactor sends a System Audio Mode Request to
//! the receiver on the display's behalf, unless an injection happened less
//! than the minimum interval ago.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cec_reactor::{CecClientSender, Reactor, ReactorConfig};
//! use tokio::io::BufReader;
//!
//! let config = ReactorConfig::default().with_dry_run(true);
//! config.validate()?;
//!
//! let mut reactor = Reactor::new(config, CecClientSender::new(child_stdin));
//! // Runs until cec-client's output ends
//! reactor.run(BufReader::new(child_stdout)).await?;
//! ```
//!
//! ## Architecture
//!
//! The pending timer is a spawned task that, on expiry, queues a message
//! tagged with a generation number back to the reactor instead of mutating
//! shared state. Arming bumps the generation; an expiry whose generation no
//! longer matches the pending correction is ignored. Cancellation therefore
//! never has to win a race with a timer that has already fired.

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod reactor;
pub mod sender;
pub mod timer;

// Re-export main types for convenience
pub use config::ReactorConfig;
pub use error::{ConfigError, ReactorError, Result, SendError};
pub use reactor::{Outcome, Reactor, ReactorStatus, TRAFFIC_TARGET};
pub use sender::{CecClientSender, CommandSender};
pub use timer::{PendingTimer, TimerExpired};

// Re-export commonly used types from dependencies
pub use cec_parser::{CecFrame, LogicalAddress};
