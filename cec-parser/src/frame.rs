//! Typed CEC frames
//!
//! A frame is a header byte (source nibble, destination nibble), an opcode
//! byte and zero or more operand bytes. On the wire of `cec-client` traces
//! and `tx` commands it is written as colon-separated hex, e.g. `15:70:00:00`.

use std::fmt;
use std::str::FromStr;

use crate::address::{Destination, LogicalAddress, PhysicalAddress};
use crate::error::{ParseError, ParseResult};
use crate::opcode::Opcode;

/// Set System Audio Mode operand meaning "on"
const SYSTEM_AUDIO_STATUS_ON: u8 = 0x01;

/// One decoded bus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CecFrame {
    pub source: LogicalAddress,
    pub destination: Destination,
    pub opcode: Opcode,
    pub payload: Vec<u8>,
}

impl CecFrame {
    pub fn new(
        source: LogicalAddress,
        destination: impl Into<Destination>,
        opcode: Opcode,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            source,
            destination: destination.into(),
            opcode,
            payload: payload.into(),
        }
    }

    /// Decode a raw byte sequence (header, opcode, operands).
    pub fn from_bytes(bytes: &[u8]) -> ParseResult<Self> {
        match bytes {
            [header, opcode, payload @ ..] => Ok(Self {
                source: LogicalAddress::from_nibble(header >> 4),
                destination: Destination::from_nibble(*header),
                opcode: Opcode::from_byte(*opcode),
                payload: payload.to_vec(),
            }),
            _ => Err(ParseError::FrameTooShort(bytes.len())),
        }
    }

    pub fn header(&self) -> u8 {
        (self.source.value() << 4) | self.destination.nibble()
    }

    /// Encode back into header, opcode and operand bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 + self.payload.len());
        bytes.push(self.header());
        bytes.push(self.opcode.byte());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    pub fn is_active_source(&self) -> bool {
        self.opcode == Opcode::ACTIVE_SOURCE
    }

    /// True for Set System Audio Mode carrying the "on" operand.
    pub fn is_system_audio_on(&self) -> bool {
        self.opcode == Opcode::SET_SYSTEM_AUDIO_MODE
            && self.payload.first() == Some(&SYSTEM_AUDIO_STATUS_ON)
    }

    /// Physical address announced by an Active Source frame, if the operand is present.
    pub fn active_source_physical_address(&self) -> Option<PhysicalAddress> {
        if !self.is_active_source() {
            return None;
        }
        match self.payload.as_slice() {
            [hi, lo, ..] => Some(PhysicalAddress::from_bytes([*hi, *lo])),
            _ => None,
        }
    }
}

impl fmt::Display for CecFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}", self.header(), self.opcode.byte())?;
        for byte in &self.payload {
            write!(f, ":{byte:02x}")?;
        }
        Ok(())
    }
}

/// Strict parse of colon-separated hex: every field must be exactly two hex digits.
impl FromStr for CecFrame {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        let bytes = s
            .split(':')
            .map(parse_hex_byte)
            .collect::<ParseResult<Vec<u8>>>()?;
        Self::from_bytes(&bytes)
    }
}

fn parse_hex_byte(field: &str) -> ParseResult<u8> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidHexByte(field.to_string()));
    }
    u8::from_str_radix(field, 16).map_err(|_| ParseError::InvalidHexByte(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_nibbles() {
        let frame: CecFrame = "5f:72:01".parse().unwrap();
        assert_eq!(frame.source, LogicalAddress::AUDIO_SYSTEM);
        assert_eq!(frame.destination, Destination::Broadcast);
        assert_eq!(frame.opcode, Opcode::SET_SYSTEM_AUDIO_MODE);
        assert_eq!(frame.payload, vec![0x01]);
        assert!(frame.is_system_audio_on());
        assert!(!frame.is_active_source());
    }

    #[test]
    fn test_system_audio_off_is_not_on() {
        let frame: CecFrame = "5f:72:00".parse().unwrap();
        assert!(!frame.is_system_audio_on());

        let frame: CecFrame = "5f:72".parse().unwrap();
        assert!(!frame.is_system_audio_on());
    }

    #[test]
    fn test_active_source_physical_address() {
        let frame: CecFrame = "8f:82:36:00".parse().unwrap();
        assert!(frame.is_active_source());
        assert_eq!(frame.source.value(), 0x8);
        assert_eq!(
            frame.active_source_physical_address(),
            Some(PhysicalAddress::from_bytes([0x36, 0x00]))
        );

        let truncated: CecFrame = "8f:82".parse().unwrap();
        assert!(truncated.is_active_source());
        assert_eq!(truncated.active_source_physical_address(), None);
    }

    #[test]
    fn test_display_is_lowercase_colon_hex() {
        let frame = CecFrame::new(
            LogicalAddress::RECORDING_1,
            LogicalAddress::AUDIO_SYSTEM,
            Opcode::SYSTEM_AUDIO_MODE_REQUEST,
            PhysicalAddress::ROOT.to_bytes(),
        );
        assert_eq!(frame.header(), 0x15);
        assert_eq!(frame.to_string(), "15:70:00:00");

        let parsed: CecFrame = "BF:82:36:00".parse().unwrap();
        assert_eq!(parsed.to_string(), "bf:82:36:00");
    }

    #[test]
    fn test_strict_parse_rejects_malformed_fields() {
        assert_eq!("15".parse::<CecFrame>(), Err(ParseError::FrameTooShort(1)));
        assert!("15:7".parse::<CecFrame>().is_err());
        assert!("15:700".parse::<CecFrame>().is_err());
        assert!("15:70:".parse::<CecFrame>().is_err());
        assert!("1g:70".parse::<CecFrame>().is_err());
        assert!("".parse::<CecFrame>().is_err());
        assert!("+1:70".parse::<CecFrame>().is_err());
    }
}
