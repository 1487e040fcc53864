//! The seat record and its three-state status enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{SeatId, UserId};

/// The three states a seat can be in.
///
/// The wire contract uses two encodings of the same enumeration: the
/// seat-map query carries the integer [`code`](SeatStatus::code)
/// (0/1/2), push events carry the lowercase string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// The seat can be held by anyone.
    Available,
    /// The seat is reserved by one user until the hold expires.
    Held,
    /// The seat is sold. Terminal; no further transitions.
    Sold,
}

impl SeatStatus {
    /// Integer encoding used by the seat-map query surface.
    pub const fn code(self) -> u8 {
        match self {
            Self::Available => 0,
            Self::Held => 1,
            Self::Sold => 2,
        }
    }
}

impl std::fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Held => write!(f, "held"),
            Self::Sold => write!(f, "sold"),
        }
    }
}

/// Canonical record for one seat.
///
/// Invariants maintained by the registry: `holder` is `None` exactly
/// when the seat is `Available` (it is retained after a sale for audit),
/// `hold_expires_at` is `Some` exactly when the seat is `Held`, and
/// `version` increases by one on every successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Externally assigned identifier, immutable once registered.
    pub seat_id: SeatId,
    /// Current state.
    pub status: SeatStatus,
    /// The user holding or owning the seat.
    pub holder: Option<UserId>,
    /// When the current hold lapses.
    pub hold_expires_at: Option<DateTime<Utc>>,
    /// Monotonic transition counter, starts at 0 on registration.
    pub version: u64,
}

impl Seat {
    /// Create a fresh available seat.
    pub fn new(seat_id: SeatId) -> Self {
        Self {
            seat_id,
            status: SeatStatus::Available,
            holder: None,
            hold_expires_at: None,
            version: 0,
        }
    }

    /// Whether the seat is held and its hold has lapsed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == SeatStatus::Held
            && self.hold_expires_at.is_some_and(|expires| expires <= now)
    }
}
