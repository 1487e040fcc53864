//! Update hub — the subscriber registry and broadcast primitive.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use seatlock_core::events::{SeatEventSink, SeatUpdate};

use crate::message::OutboundMessage;
use crate::subscriber::{SubscriberHandle, SubscriberId};

/// Fan-out of seat transitions to all connected observers.
///
/// The hub exclusively owns the subscriber set. Broadcasting only
/// enqueues into each subscriber's buffered channel; actual transport
/// writes happen in per-connection forwarder tasks, so a slow or dead
/// observer never delays a seat transition or another observer.
#[derive(Debug)]
pub struct UpdateHub {
    /// Subscriber ID → handle.
    subscribers: DashMap<SubscriberId, Arc<SubscriberHandle>>,
    /// Delivery buffer size per subscriber.
    buffer_size: usize,
}

impl UpdateHub {
    /// Create a hub whose subscribers each buffer `buffer_size`
    /// undelivered messages.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            subscribers: DashMap::new(),
            buffer_size,
        }
    }

    /// Register a new observer.
    ///
    /// Returns the handle and the receiver the caller's forwarder task
    /// drains. The subscriber receives every transition published after
    /// this call; earlier transitions are visible only through the
    /// snapshot query.
    pub fn subscribe(&self) -> (Arc<SubscriberHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(SubscriberHandle::new(tx));
        self.subscribers.insert(handle.id, handle.clone());

        info!(
            subscriber_id = %handle.id,
            total = self.subscribers.len(),
            "Subscriber registered"
        );

        (handle, rx)
    }

    /// Remove an observer. Idempotent: removing an unknown or
    /// already-removed id is a no-op.
    pub fn unsubscribe(&self, id: &SubscriberId) {
        if let Some((_, handle)) = self.subscribers.remove(id) {
            handle.mark_dead();
            info!(
                subscriber_id = %id,
                total = self.subscribers.len(),
                "Subscriber removed"
            );
        }
    }

    /// Deliver `msg` to every live subscriber.
    ///
    /// Fire-and-forget: failures never reach the caller. Subscribers
    /// whose transport is gone are pruned from the registry here.
    pub fn broadcast(&self, msg: &OutboundMessage) {
        let mut dead: Vec<SubscriberId> = Vec::new();

        for entry in self.subscribers.iter() {
            let handle = entry.value();
            handle.send(msg.clone());
            if !handle.is_alive() {
                dead.push(handle.id);
            }
        }

        for id in dead {
            if self.subscribers.remove(&id).is_some() {
                debug!(subscriber_id = %id, "Pruned dead subscriber after failed delivery");
            }
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drain the registry during shutdown: every subscriber is marked
    /// dead and removed, closing the delivery channels.
    pub fn close_all(&self) {
        let count = self.subscribers.len();
        for entry in self.subscribers.iter() {
            entry.value().mark_dead();
        }
        self.subscribers.clear();
        if count > 0 {
            info!(count, "All subscribers drained");
        }
    }
}

impl SeatEventSink for UpdateHub {
    fn publish(&self, update: SeatUpdate) {
        self.broadcast(&OutboundMessage::from(update));
    }
}
