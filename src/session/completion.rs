//! One-shot completion signal
//!
//! Built on a `tokio::sync::watch` channel holding a single `bool`. The
//! sender lives inside the signal, so the channel can never close while
//! someone is waiting on it.

use tokio::sync::watch;

/// Single-fire broadcast event
///
/// Any number of waiters may await it, before or after it fires. Once fired
/// it stays fired.
#[derive(Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<bool>,
}

impl CompletionSignal {
    /// Create a signal in the unfired state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Fire the signal
    ///
    /// Returns `true` only for the call that actually fired it; later calls
    /// change nothing and wake nobody.
    pub fn fire(&self) -> bool {
        self.tx.send_if_modified(|fired| {
            if *fired {
                false
            } else {
                *fired = true;
                true
            }
        })
    }

    /// Check if the signal has fired
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the signal fires, returning at once if it already has
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender is owned by `self`, so the channel cannot close here.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}
