use thiserror::Error;

/// Errors surfaced by the event reactor
#[derive(Error, Debug)]
pub enum ReactorError {
    /// The monitor's output ended; the surrounding process decides whether to restart
    #[error("Upstream traffic stream ended")]
    StreamEnded,

    /// Reading the upstream traffic stream failed
    #[error("Failed to read upstream traffic: {0}")]
    Io(#[from] std::io::Error),

    /// The corrective command could not be transmitted
    #[error("Failed to dispatch corrective command {command:?}: {source}")]
    Dispatch {
        command: String,
        #[source]
        source: SendError,
    },
}

/// Errors from a [`crate::CommandSender`]
#[derive(Error, Debug)]
pub enum SendError {
    /// Writing to the transmit facility failed
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The transmit facility is no longer accepting commands
    #[error("Command channel has been closed")]
    Closed,
}

/// Invalid reactor configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one console address must be configured")]
    NoConsoles,

    #[error("{role} address cannot be the broadcast address")]
    BroadcastAddress { role: &'static str },

    #[error("Receiver address {0} is also listed as a console")]
    ReceiverIsConsole(cec_parser::LogicalAddress),

    #[error("Pending window must be greater than 0")]
    ZeroPendingWindow,
}

/// Result type for reactor operations
pub type Result<T> = std::result::Result<T, ReactorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reactor_error_display() {
        assert_eq!(ReactorError::StreamEnded.to_string(), "Upstream traffic stream ended");

        let error = ReactorError::Dispatch {
            command: "tx 15:70:00:00".to_string(),
            source: SendError::Closed,
        };
        assert!(error.to_string().contains("tx 15:70:00:00"));
        assert!(error.to_string().contains("closed"));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::BroadcastAddress { role: "Receiver" };
        assert_eq!(error.to_string(), "Receiver address cannot be the broadcast address");

        let error = ConfigError::ReceiverIsConsole(cec_parser::LogicalAddress::AUDIO_SYSTEM);
        assert_eq!(error.to_string(), "Receiver address 5 is also listed as a console");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: SendError = io.into();
        assert!(matches!(error, SendError::Io(_)));
    }
}
