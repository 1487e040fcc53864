//! Ping/pong heartbeat for WebSocket keepalive.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time;
use tracing;

use seatlock_core::config::RealtimeConfig;

use crate::message::OutboundMessage;
use crate::subscriber::SubscriberHandle;

/// Heartbeat configuration.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Interval between pings.
    pub ping_interval: Duration,
    /// Timeout before considering the subscriber dead.
    pub ping_timeout: Duration,
}

impl From<&RealtimeConfig> for HeartbeatConfig {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: Duration::from_secs(config.ping_interval_seconds),
            ping_timeout: Duration::from_secs(config.ping_timeout_seconds),
        }
    }
}

/// Run the heartbeat loop for one subscriber.
///
/// Sends periodic pings and checks for pong responses. Marks the
/// subscriber dead (so the hub prunes it on the next broadcast) if a
/// pong is not received within the timeout or a ping cannot be
/// enqueued.
pub async fn run_heartbeat(handle: Arc<SubscriberHandle>, config: HeartbeatConfig) {
    let mut interval = time::interval(config.ping_interval);
    // The first tick fires immediately; skip it so the deadline starts
    // counting from the first real ping.
    interval.tick().await;

    loop {
        interval.tick().await;

        if !handle.is_alive() {
            break;
        }

        let last_pong = handle.last_pong().await;
        let deadline = config.ping_interval + config.ping_timeout;
        if let Ok(elapsed) = (Utc::now() - last_pong).to_std() {
            if elapsed > deadline {
                tracing::warn!(
                    subscriber_id = %handle.id,
                    elapsed_seconds = elapsed.as_secs(),
                    "Subscriber heartbeat timeout"
                );
                handle.mark_dead();
                break;
            }
        }

        let ping = OutboundMessage::Ping {
            timestamp: Utc::now().timestamp_millis(),
        };
        if !handle.send(ping) && !handle.is_alive() {
            tracing::debug!(subscriber_id = %handle.id, "Ping send failed, subscriber dead");
            break;
        }
    }

    tracing::debug!(subscriber_id = %handle.id, "Heartbeat loop ended");
}
