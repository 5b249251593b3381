//! `cec-client` traffic trace lines
//!
//! With `-d 8` the monitor prints one line per bus frame:
//!
//! ```text
//! TRAFFIC: [   37491]     >> bf:82:36:00
//! ```
//!
//! `>>` marks frames received from the bus; `<<` marks frames the client
//! itself transmitted and is not treated as bus input.

use crate::frame::CecFrame;

/// Marker preceding a frame received from the bus
pub const RECEIVED_MARKER: &str = ">>";

/// Parse one trace line into a frame.
///
/// Returns `None` for anything that is not a well-formed received frame:
/// log chatter, transmitted frames, truncated or non-hex fields.
pub fn parse_traffic_line(line: &str) -> Option<CecFrame> {
    line.match_indices(RECEIVED_MARKER).find_map(|(index, _)| {
        let rest = &line[index + RECEIVED_MARKER.len()..];
        // The marker must be followed by whitespace, then the frame token.
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let token = rest.split_whitespace().next()?;
        token.parse().ok()
    })
}
