//! Configuration for the event reactor
//!
//! Built once at startup and handed to [`crate::Reactor::new`]; never mutated
//! afterwards.

use std::collections::BTreeSet;
use std::time::Duration;

use cec_parser::{CecFrame, LogicalAddress, Opcode, PhysicalAddress};

use crate::error::ConfigError;

/// Configuration for the Reactor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactorConfig {
    /// Logical addresses treated as playback devices (consoles, streamers)
    /// Default: {0x4, 0x8, 0xB}
    pub consoles: BTreeSet<LogicalAddress>,

    /// Logical address of the audio receiver
    /// Default: 0x5
    pub receiver: LogicalAddress,

    /// Logical address the monitoring client transmits from
    /// Default: 0x1 (Recording 1, where libCEC registers)
    pub client: LogicalAddress,

    /// Grace period for the receiver to enable System Audio Mode on its own
    /// Default: 500 milliseconds
    pub pending_window: Duration,

    /// Minimum gap between corrective injections
    /// Default: 3 seconds
    pub min_injection_interval: Duration,

    /// Log the corrective command instead of transmitting it
    /// Default: false
    pub dry_run: bool,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            consoles: [0x4, 0x8, 0xB]
                .into_iter()
                .map(LogicalAddress::from_nibble)
                .collect(),
            receiver: LogicalAddress::AUDIO_SYSTEM,
            client: LogicalAddress::RECORDING_1,
            pending_window: Duration::from_millis(500),
            min_injection_interval: Duration::from_secs(3),
            dry_run: false,
        }
    }
}

impl ReactorConfig {
    /// Create a ReactorConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the console set
    pub fn with_consoles(mut self, consoles: impl IntoIterator<Item = LogicalAddress>) -> Self {
        self.consoles = consoles.into_iter().collect();
        self
    }

    pub fn with_receiver(mut self, receiver: LogicalAddress) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn with_client(mut self, client: LogicalAddress) -> Self {
        self.client = client;
        self
    }

    pub fn with_pending_window(mut self, pending_window: Duration) -> Self {
        self.pending_window = pending_window;
        self
    }

    pub fn with_min_injection_interval(mut self, interval: Duration) -> Self {
        self.min_injection_interval = interval;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_console(&self, address: LogicalAddress) -> bool {
        self.consoles.contains(&address)
    }

    /// System Audio Mode Request from the client to the receiver on behalf of the display.
    pub fn corrective_frame(&self) -> CecFrame {
        CecFrame::new(
            self.client,
            self.receiver,
            Opcode::SYSTEM_AUDIO_MODE_REQUEST,
            PhysicalAddress::ROOT.to_bytes(),
        )
    }

    /// The `cec-client` command line that transmits [`Self::corrective_frame`].
    pub fn corrective_command(&self) -> String {
        format!("tx {}", self.corrective_frame())
    }

    /// Validate the configuration and return the first issue found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consoles.is_empty() {
            return Err(ConfigError::NoConsoles);
        }

        if self.receiver.is_broadcast() {
            return Err(ConfigError::BroadcastAddress { role: "Receiver" });
        }

        if self.client.is_broadcast() {
            return Err(ConfigError::BroadcastAddress { role: "Client" });
        }

        if self.is_console(self.receiver) {
            return Err(ConfigError::ReceiverIsConsole(self.receiver));
        }

        if self.pending_window.is_zero() {
            return Err(ConfigError::ZeroPendingWindow);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn la(value: u8) -> LogicalAddress {
        LogicalAddress::new(value).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ReactorConfig::default();
        assert!(config.is_console(la(0x4)));
        assert!(config.is_console(la(0x8)));
        assert!(config.is_console(la(0xB)));
        assert!(!config.is_console(la(0x0)));
        assert_eq!(config.receiver, la(0x5));
        assert_eq!(config.pending_window, Duration::from_millis(500));
        assert_eq!(config.min_injection_interval, Duration::from_secs(3));
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_corrective_command() {
        let config = ReactorConfig::default();
        assert_eq!(config.corrective_command(), "tx 15:70:00:00");

        let config = config.with_client(la(0xE)).with_receiver(la(0x5));
        assert_eq!(config.corrective_command(), "tx e5:70:00:00");
    }

    #[test]
    fn test_validation() {
        let config = ReactorConfig::new().with_consoles([]);
        assert_eq!(config.validate(), Err(ConfigError::NoConsoles));

        let config = ReactorConfig::new().with_receiver(LogicalAddress::BROADCAST);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BroadcastAddress { role: "Receiver" })
        );

        let config = ReactorConfig::new().with_client(LogicalAddress::BROADCAST);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BroadcastAddress { role: "Client" })
        );

        let config = ReactorConfig::new().with_consoles([la(0x4), la(0x5)]);
        assert_eq!(config.validate(), Err(ConfigError::ReceiverIsConsole(la(0x5))));

        let config = ReactorConfig::new().with_pending_window(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPendingWindow));

        // A zero interval simply disables rate limiting
        let config = ReactorConfig::new().with_min_injection_interval(Duration::ZERO);
        assert!(config.validate().is_ok());
    }
}
