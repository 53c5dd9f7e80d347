//! Shutdown coordination for the relay.
//!
//! Triggering stops the listener from accepting; invocations already
//! forwarding are allowed to finish before the server returns.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Why the relay is going down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGTERM or Ctrl+C.
    Signal,
    /// Asked for by the embedding code (tests, supervisors).
    Requested,
}

impl ShutdownReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ShutdownReason::Signal => "signal",
            ShutdownReason::Requested => "requested",
        }
    }
}

/// Broadcast coordinator for graceful shutdown. Fires at most once.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: AtomicBool::new(false),
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Start draining. Only the first call sends anything; subscribers
    /// created afterwards will not see it.
    pub fn trigger(&self, reason: ShutdownReason) {
        if self.triggered.swap(true, Ordering::SeqCst) {
            tracing::debug!(reason = reason.as_str(), "Shutdown already in progress");
            return;
        }

        tracing::info!(
            reason = reason.as_str(),
            listeners = self.tx.receiver_count(),
            "Relay shutting down, draining in-flight invocations"
        );
        let _ = self.tx.send(());
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Number of subscribers still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
