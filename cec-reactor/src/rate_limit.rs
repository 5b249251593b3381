//! Global rate limit on corrective injections

use std::time::Duration;

use tokio::time::Instant;

/// Whether an injection may happen at `now`.
///
/// Allowed when nothing has been injected yet, or when at least
/// `min_interval` has passed since the last injection. Recording the new
/// injection time is left to the caller, after a successful send.
pub fn allow(now: Instant, last_injection_at: Option<Instant>, min_interval: Duration) -> bool {
    match last_injection_at {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= min_interval,
    }
}
