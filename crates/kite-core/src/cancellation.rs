//! An ambient cancellation signal, plumbed into every long-running
//! operation (§5): stage fan-out, batch validation, and query rescoring
//! all poll this instead of each inventing their own stop flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// A cheap, cloneable cancellation flag.
///
/// Cloning shares the same underlying state; cancelling any clone cancels
/// all of them. This deliberately does not pull in a dedicated
/// cancellation-token crate — the semantics needed here (a one-shot flip
/// from live to cancelled, observable from many tasks) are small enough to
/// hand-roll, the way the teacher hand-rolls its own Levenshtein distance
/// rather than reaching for a string-metrics crate.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Creates a fresh, not-yet-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Marks this token (and all of its clones) as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once cancellation is requested; resolves immediately if it
    /// already has been.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.notify.notified().await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
