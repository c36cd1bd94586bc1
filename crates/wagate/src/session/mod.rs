//! WhatsApp session lifecycle tracking.
//!
//! The bridge owns the actual WhatsApp web session; this module tracks
//! whether that session is currently usable. Lifecycle events arrive on a
//! channel from the bridge event stream and mutate a single process-wide
//! readiness cell that request handlers read on every call.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use wagate_protocol::SessionEvent;

// ============================================================================
// Session Status
// ============================================================================

/// Lifecycle state of the underlying WhatsApp session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session is starting up; not yet usable.
    Initializing,
    /// Session is connected and usable.
    Ready,
    /// Session dropped; unusable until the bridge re-emits ready.
    Disconnected,
    /// Authentication failed. The operator must re-authenticate out of
    /// band; only a fresh ready event leaves this state.
    AuthFailed,
}

// ============================================================================
// Session Watch
// ============================================================================

/// Shared readiness cell.
///
/// Single writer (the event loop), any number of readers. Reads never
/// block and always observe the most recently committed status. Each
/// instance is independent, so tests can drive their own lifecycle.
#[derive(Clone)]
pub struct SessionWatch {
    tx: Arc<watch::Sender<SessionStatus>>,
}

impl SessionWatch {
    /// Create a new watch in `Initializing`.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionStatus::Initializing);
        Self { tx: Arc::new(tx) }
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        *self.tx.borrow()
    }

    /// Whether request handling may proceed.
    pub fn is_ready(&self) -> bool {
        self.status() == SessionStatus::Ready
    }

    /// Commit a new status, logging the transition.
    pub fn set(&self, status: SessionStatus) {
        let previous = self.tx.send_replace(status);
        if previous != status {
            info!(from = ?previous, to = ?status, "Session status changed");
        }
    }
}

impl Default for SessionWatch {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Event Loop
// ============================================================================

/// Consume bridge lifecycle events and keep `watch` current.
///
/// Runs until the event channel closes. Incoming messages and QR
/// challenges are observed and logged only.
pub async fn drive(watch: SessionWatch, mut rx: mpsc::Receiver<SessionEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            SessionEvent::QrChallenge { data } => {
                info!(qr_len = data.len(), "QR challenge received; scan with the WhatsApp app");
            }

            SessionEvent::Ready => {
                watch.set(SessionStatus::Ready);
                info!("WhatsApp session ready");
            }

            SessionEvent::AuthFailure { message } => {
                watch.set(SessionStatus::AuthFailed);
                error!(message = %message, "WhatsApp authentication failed");
            }

            SessionEvent::Disconnected { reason } => {
                watch.set(SessionStatus::Disconnected);
                warn!(reason = %reason, "WhatsApp session disconnected");
            }

            SessionEvent::MessageReceived(msg) => {
                debug!(
                    chat_id = %msg.chat_id,
                    from = %msg.from,
                    body = msg.body.as_deref().unwrap_or(""),
                    "Message received"
                );
            }
        }
    }

    debug!("Session event channel closed");
}
