//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use seatlock_core::types::id::{SeatId, UserId};

/// Body of a hold, confirm, or release request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeatActionRequest {
    /// Target seat.
    #[validate(range(min = 1, message = "seat_id must be positive"))]
    pub seat_id: u32,
    /// Acting user.
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: u64,
}

impl SeatActionRequest {
    /// The target seat as a typed identifier.
    pub fn seat(&self) -> SeatId {
        SeatId::new(self.seat_id)
    }

    /// The acting user as a typed identifier.
    pub fn user(&self) -> UserId {
        UserId::new(self.user_id)
    }
}
