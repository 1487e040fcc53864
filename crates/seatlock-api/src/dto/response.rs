//! Response DTOs.

use serde::{Deserialize, Serialize};

use seatlock_core::types::id::{SeatId, UserId};
use seatlock_core::types::seat::Seat;

/// Outcome of a successful hold/confirm/release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatActionResponse {
    /// The seat's new state as a lowercase string.
    pub status: String,
    /// The seat acted on.
    pub seat_id: SeatId,
}

impl SeatActionResponse {
    /// Build the response from the post-transition seat record.
    pub fn from_seat(seat: &Seat) -> Self {
        Self {
            status: seat.status.to_string(),
            seat_id: seat.seat_id,
        }
    }
}

/// One entry of the seat-map query. `status` uses the integer encoding
/// (0 = available, 1 = held, 2 = sold).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMapEntry {
    /// Seat identifier.
    pub seat_id: SeatId,
    /// Integer-encoded state.
    pub status: u8,
    /// Holder or owner, absent while available.
    pub user_id: Option<UserId>,
}

impl From<&Seat> for SeatMapEntry {
    fn from(seat: &Seat) -> Self {
        Self {
            seat_id: seat.seat_id,
            status: seat.status.code(),
            user_id: seat.holder,
        }
    }
}

/// Basic health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: i64,
}

/// Detailed health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Service status.
    pub status: String,
    /// Total seats in the venue.
    pub seats_total: usize,
    /// Seats currently available.
    pub seats_available: usize,
    /// Seats currently held.
    pub seats_held: usize,
    /// Seats sold.
    pub seats_sold: usize,
    /// Connected live-update subscribers.
    pub subscribers: usize,
    /// Seconds since the server started.
    pub uptime_seconds: i64,
}
