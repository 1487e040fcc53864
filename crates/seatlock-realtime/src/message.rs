//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};

use seatlock_core::events::SeatUpdate;
use seatlock_core::types::id::{SeatId, UserId};
use seatlock_core::types::seat::SeatStatus;

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// One seat transition.
    SeatUpdate {
        /// The seat that transitioned.
        seat_id: SeatId,
        /// The new state.
        status: SeatStatus,
        /// The holder after the transition, absent for available.
        user_id: Option<UserId>,
        /// The seat's version after the transition.
        version: u64,
    },
    /// Ping (server keepalive).
    Ping {
        /// Server timestamp, epoch milliseconds.
        timestamp: i64,
    },
}

impl From<SeatUpdate> for OutboundMessage {
    fn from(update: SeatUpdate) -> Self {
        Self::SeatUpdate {
            seat_id: update.seat_id,
            status: update.status,
            user_id: update.user_id,
            version: update.version,
        }
    }
}

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
}
