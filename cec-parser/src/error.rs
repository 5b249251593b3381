//! Error types for frame parsing

use thiserror::Error;

/// Errors produced when a string is parsed as a CEC value.
///
/// Traffic lines never surface these: [`crate::parse_traffic_line`] maps any
/// failure to "not a frame".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A field was not a two-digit hexadecimal byte
    #[error("Invalid hex byte: {0:?}")]
    InvalidHexByte(String),

    /// A frame needs at least a header and an opcode
    #[error("Frame too short: expected header and opcode, got {0} byte(s)")]
    FrameTooShort(usize),

    /// Logical addresses are a single nibble
    #[error("Logical address out of range: {0:?}")]
    InvalidLogicalAddress(String),
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
