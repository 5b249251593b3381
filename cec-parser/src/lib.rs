//! # cec-parser
//!
//! Typed HDMI-CEC frames decoded from `cec-client` traffic traces.
//!
//! ## Usage
//!
//! ```rust
//! use cec_parser::{parse_traffic_line, LogicalAddress, Opcode};
//!
//! let frame = parse_traffic_line("TRAFFIC: [   37491]     >> 8f:82:36:00").unwrap();
//! assert!(frame.is_active_source());
//! assert_eq!(frame.source, LogicalAddress::new(0x8).unwrap());
//! assert_eq!(frame.opcode, Opcode::ACTIVE_SOURCE);
//! assert_eq!(frame.to_string(), "8f:82:36:00");
//!
//! // Log chatter is simply not a frame
//! assert!(parse_traffic_line("NOTICE: connection opened").is_none());
//! ```

pub mod address;
pub mod error;
pub mod frame;
pub mod opcode;
pub mod traffic;

// Re-export the common types for convenient top-level access
pub use address::{Destination, LogicalAddress, PhysicalAddress};
pub use error::{ParseError, ParseResult};
pub use frame::CecFrame;
pub use opcode::Opcode;
pub use traffic::parse_traffic_line;
