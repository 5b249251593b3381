//! Cancellable one-shot timer for the pending correction.
//!
//! The timer does not call back into the reactor. On expiry it sends a
//! [`TimerExpired`] message carrying the generation it was armed with into
//! the reactor's own queue. Cancellation aborts the sleeping task, but an
//! expiry that was already queued is still delivered; the reactor compares
//! generations and discards it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Expiry notice sent by a [`PendingTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerExpired {
    /// Generation of the pending correction that armed the timer
    pub generation: u64,
}

/// Handle to a scheduled expiry.
///
/// Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct PendingTimer {
    generation: u64,
    task: JoinHandle<()>,
}

impl PendingTimer {
    /// Schedule a [`TimerExpired`] for `generation` to be sent after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(
        delay: Duration,
        generation: u64,
        expired_tx: mpsc::UnboundedSender<TimerExpired>,
    ) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the reactor itself has shut down
            let _ = expired_tx.send(TimerExpired { generation });
        });

        Self { generation, task }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Best-effort cancellation. An expiry already queued is not recalled.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for PendingTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
