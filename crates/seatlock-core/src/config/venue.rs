//! Venue seat-map configuration.

use serde::{Deserialize, Serialize};

use crate::types::id::SeatId;

/// The fixed seat map the registry is seeded with at startup.
///
/// Seats are registered once and live for the process lifetime; they
/// are never added or removed at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Number of seats in the venue.
    #[serde(default = "default_total_seats")]
    pub total_seats: u32,
    /// Identifier of the first seat; seats are numbered contiguously
    /// from here.
    #[serde(default = "default_first_seat_id")]
    pub first_seat_id: u32,
}

impl VenueConfig {
    /// The full ordered set of seat identifiers for this venue.
    pub fn seat_ids(&self) -> Vec<SeatId> {
        (self.first_seat_id..self.first_seat_id + self.total_seats)
            .map(SeatId::new)
            .collect()
    }
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            total_seats: default_total_seats(),
            first_seat_id: default_first_seat_id(),
        }
    }
}

fn default_total_seats() -> u32 {
    100
}

fn default_first_seat_id() -> u32 {
    1
}
