//! Individual subscriber handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::message::OutboundMessage;

/// Unique subscriber identifier.
pub type SubscriberId = Uuid;

/// A handle to a single connected observer.
///
/// Holds the sender half of the subscriber's buffered delivery channel
/// plus liveness bookkeeping. The handle carries no seat filter: every
/// subscriber receives every transition.
#[derive(Debug)]
pub struct SubscriberHandle {
    /// Unique subscriber ID.
    pub id: SubscriberId,
    /// When the subscriber connected.
    pub connected_at: DateTime<Utc>,
    /// Sender for outbound messages.
    sender: mpsc::Sender<OutboundMessage>,
    /// Last pong received.
    last_pong: tokio::sync::RwLock<DateTime<Utc>>,
    /// Whether the subscriber is still alive.
    alive: AtomicBool,
}

impl SubscriberHandle {
    /// Create a new subscriber handle around a delivery channel.
    pub fn new(sender: mpsc::Sender<OutboundMessage>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            connected_at: now,
            sender,
            last_pong: tokio::sync::RwLock::new(now),
            alive: AtomicBool::new(true),
        }
    }

    /// Enqueue an outbound message for this subscriber.
    ///
    /// Never blocks. A full buffer drops the message for this
    /// subscriber only; a closed channel marks the subscriber dead.
    /// Returns whether the message was enqueued.
    pub fn send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    subscriber_id = %self.id,
                    "Subscriber send buffer full, dropping message"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if the subscriber is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the subscriber as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Record a pong response.
    pub async fn record_pong(&self) {
        let mut lp = self.last_pong.write().await;
        *lp = Utc::now();
    }

    /// When the last pong was received.
    pub async fn last_pong(&self) -> DateTime<Utc> {
        *self.last_pong.read().await
    }
}
