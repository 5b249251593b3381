//! Bus addressing: logical addresses, frame destinations and physical addresses

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ParseResult};

/// A device's role on the CEC bus, a single nibble (0x0..=0xF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalAddress(u8);

impl LogicalAddress {
    /// The display
    pub const TV: Self = Self(0x0);
    /// First recording device; libCEC registers here by default
    pub const RECORDING_1: Self = Self(0x1);
    /// Audio receiver / soundbar
    pub const AUDIO_SYSTEM: Self = Self(0x5);
    /// Broadcast as a destination, unregistered as a source
    pub const BROADCAST: Self = Self(0xF);

    /// Create a logical address, returning `None` if `value` exceeds a nibble.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 0xF {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Build from the low nibble of `value`, ignoring the high nibble.
    pub const fn from_nibble(value: u8) -> Self {
        Self(value & 0x0F)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_broadcast(self) -> bool {
        self.0 == 0xF
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

/// Parses a single hex nibble, optionally prefixed with `0x`.
///
/// `"b"` and `"0xB"` are accepted; `"11"` is rejected.
impl FromStr for LogicalAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        u8::from_str_radix(digits, 16)
            .ok()
            .filter(|_| !digits.is_empty() && digits.len() <= 2)
            .and_then(LogicalAddress::new)
            .ok_or_else(|| ParseError::InvalidLogicalAddress(s.to_string()))
    }
}

/// Where a frame is addressed: one device, or every device on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Device(LogicalAddress),
    Broadcast,
}

impl Destination {
    /// Decode the low nibble of a header byte.
    pub const fn from_nibble(value: u8) -> Self {
        let address = LogicalAddress::from_nibble(value);
        if address.is_broadcast() {
            Destination::Broadcast
        } else {
            Destination::Device(address)
        }
    }

    /// The nibble this destination occupies in a header byte.
    pub const fn nibble(self) -> u8 {
        match self {
            Destination::Device(address) => address.value(),
            Destination::Broadcast => LogicalAddress::BROADCAST.value(),
        }
    }

    pub const fn is_broadcast(self) -> bool {
        matches!(self, Destination::Broadcast)
    }
}

impl From<LogicalAddress> for Destination {
    fn from(address: LogicalAddress) -> Self {
        Destination::from_nibble(address.value())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Device(address) => address.fmt(f),
            Destination::Broadcast => f.write_str("broadcast"),
        }
    }
}

/// Position of a device in the HDMI topology, e.g. `3.6.0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhysicalAddress([u8; 2]);

impl PhysicalAddress {
    /// The display's own physical address
    pub const ROOT: Self = Self([0x00, 0x00]);

    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        self.0
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [hi, lo] = self.0;
        write!(f, "{:x}.{:x}.{:x}.{:x}", hi >> 4, hi & 0xF, lo >> 4, lo & 0xF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_address_range() {
        assert_eq!(LogicalAddress::new(0xB).map(LogicalAddress::value), Some(0xB));
        assert!(LogicalAddress::new(0x10).is_none());
        assert!(LogicalAddress::BROADCAST.is_broadcast());
        assert!(!LogicalAddress::TV.is_broadcast());
    }

    #[test]
    fn test_logical_address_from_str() {
        assert_eq!("5".parse::<LogicalAddress>().unwrap(), LogicalAddress::AUDIO_SYSTEM);
        assert_eq!("b".parse::<LogicalAddress>().unwrap().value(), 0xB);
        assert_eq!("0xB".parse::<LogicalAddress>().unwrap().value(), 0xB);
        assert_eq!("0f".parse::<LogicalAddress>().unwrap(), LogicalAddress::BROADCAST);

        assert!("".parse::<LogicalAddress>().is_err());
        assert!("0x".parse::<LogicalAddress>().is_err());
        assert!("10".parse::<LogicalAddress>().is_err());
        assert!("g".parse::<LogicalAddress>().is_err());
        assert!("123".parse::<LogicalAddress>().is_err());
    }

    #[test]
    fn test_logical_address_display_is_uppercase_hex() {
        assert_eq!(LogicalAddress::from_nibble(0xB).to_string(), "B");
        assert_eq!(LogicalAddress::from_nibble(0x4B).to_string(), "B");
    }

    #[test]
    fn test_destination_nibbles() {
        assert_eq!(Destination::from_nibble(0xF), Destination::Broadcast);
        assert_eq!(
            Destination::from_nibble(0x5),
            Destination::Device(LogicalAddress::AUDIO_SYSTEM)
        );
        assert_eq!(Destination::Broadcast.nibble(), 0xF);
        assert_eq!(Destination::from(LogicalAddress::BROADCAST), Destination::Broadcast);
        assert_eq!(Destination::Broadcast.to_string(), "broadcast");
    }

    #[test]
    fn test_physical_address_display() {
        assert_eq!(PhysicalAddress::from_bytes([0x36, 0x00]).to_string(), "3.6.0.0");
        assert_eq!(PhysicalAddress::ROOT.to_string(), "0.0.0.0");
    }
}
