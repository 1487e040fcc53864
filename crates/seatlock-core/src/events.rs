//! Seat transition events and the sink trait connecting the lock
//! manager to the notification fan-out.

use serde::{Deserialize, Serialize};

use crate::types::id::{SeatId, UserId};
use crate::types::seat::{Seat, SeatStatus};

/// One successful seat transition, as observed by subscribers.
///
/// `version` orders the events of a single seat; events of different
/// seats carry no relative ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatUpdate {
    /// The seat that transitioned.
    pub seat_id: SeatId,
    /// The state the seat transitioned into.
    pub status: SeatStatus,
    /// The holder after the transition; `None` for transitions back to
    /// available (release or expiry).
    pub user_id: Option<UserId>,
    /// The seat's version after the transition.
    pub version: u64,
}

impl SeatUpdate {
    /// Build the update describing `seat`'s latest transition.
    pub fn from_seat(seat: &Seat) -> Self {
        let user_id = match seat.status {
            SeatStatus::Available => None,
            SeatStatus::Held | SeatStatus::Sold => seat.holder,
        };
        Self {
            seat_id: seat.seat_id,
            status: seat.status,
            user_id,
            version: seat.version,
        }
    }
}

/// Consumer of seat transition events.
///
/// Implemented by the notification fan-out. `publish` must only enqueue:
/// it is invoked while the transitioning seat is still exclusively
/// locked (which is what guarantees per-seat delivery order), so it must
/// never block or call back into the lock manager.
pub trait SeatEventSink: Send + Sync + 'static {
    /// Accept one transition event. Fire-and-forget for the caller.
    fn publish(&self, update: SeatUpdate);
}

/// Sink that discards every event. Useful for tools and tests that
/// exercise the lock manager without observers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl SeatEventSink for NullEventSink {
    fn publish(&self, _update: SeatUpdate) {}
}
