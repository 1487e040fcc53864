//! Seat registry — canonical seat state with per-seat atomic mutation.
//!
//! The seat map is built once at startup and never resized, so each
//! seat record sits behind its own mutex and operations on different
//! seats never contend. [`SeatRegistry::compare_and_transition`] is the
//! sole mutation primitive; everything else is a read.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use thiserror::Error;

use seatlock_core::types::id::{SeatId, UserId};
use seatlock_core::types::seat::{Seat, SeatStatus};

/// The pre-condition a transition requires of the seat's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The seat must be available.
    Available,
    /// The seat must be held by this user, expired or not.
    HeldBy(UserId),
    /// The seat must be held by this user and the hold must not have
    /// lapsed at the evaluation instant.
    HeldByUnexpired(UserId),
    /// The seat must be held by anyone and the hold must have lapsed.
    HeldExpired,
}

/// The state a successful transition moves the seat into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextState {
    /// Place a hold for `holder` lasting until `expires_at`.
    Held {
        /// The user taking the hold.
        holder: UserId,
        /// When the hold lapses.
        expires_at: DateTime<Utc>,
    },
    /// Convert the current hold into a sale. The holder is retained.
    Sold,
    /// Return the seat to the pool; holder and expiry are cleared.
    Available,
}

/// Failure of a compare-and-transition attempt. Mismatches carry a
/// snapshot of the seat as it was observed, so callers can classify the
/// reason without a second read.
#[derive(Debug, Clone, Error)]
pub enum CasError {
    /// The seat id is not registered.
    #[error("seat {0} not found")]
    NotFound(SeatId),
    /// The seat's current state did not match the expectation.
    #[error("seat {} state mismatch", .0.seat_id)]
    Mismatch(Seat),
}

/// Authoritative in-memory mapping from seat id to seat record.
#[derive(Debug)]
pub struct SeatRegistry {
    /// Seat id → record; each record guarded by its own mutex.
    seats: HashMap<SeatId, Mutex<Seat>>,
    /// All registered ids in ascending order, for ordered snapshots.
    ids: Vec<SeatId>,
}

impl SeatRegistry {
    /// Build a registry containing the given seats, all available.
    pub fn new(seat_ids: impl IntoIterator<Item = SeatId>) -> Self {
        let mut ids: Vec<SeatId> = seat_ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let seats = ids
            .iter()
            .map(|&id| (id, Mutex::new(Seat::new(id))))
            .collect();

        Self { seats, ids }
    }

    /// All registered seat ids in ascending order.
    pub fn seat_ids(&self) -> &[SeatId] {
        &self.ids
    }

    /// Number of registered seats.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the registry holds no seats.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Point-in-time copy of one seat record.
    pub fn get(&self, seat_id: SeatId) -> Result<Seat, CasError> {
        let slot = self.seats.get(&seat_id).ok_or(CasError::NotFound(seat_id))?;
        Ok(lock_seat(slot).clone())
    }

    /// The sole mutation primitive.
    ///
    /// Atomically checks `expected` against the seat's current state
    /// (expiry comparisons use `now`) and, on a match, applies `next`,
    /// increments the seat's version, and invokes `on_commit` with the
    /// updated record **while the seat mutex is still held** — the lock
    /// manager uses this to enqueue notification events in version
    /// order. On a mismatch the seat is untouched and the observed
    /// record is returned in the error.
    pub fn compare_and_transition(
        &self,
        seat_id: SeatId,
        expected: Expectation,
        next: NextState,
        now: DateTime<Utc>,
        on_commit: impl FnOnce(&Seat),
    ) -> Result<Seat, CasError> {
        let slot = self.seats.get(&seat_id).ok_or(CasError::NotFound(seat_id))?;
        let mut seat = lock_seat(slot);

        let matched = match expected {
            Expectation::Available => seat.status == SeatStatus::Available,
            Expectation::HeldBy(user) => {
                seat.status == SeatStatus::Held && seat.holder == Some(user)
            }
            Expectation::HeldByUnexpired(user) => {
                seat.status == SeatStatus::Held
                    && seat.holder == Some(user)
                    && !seat.is_expired(now)
            }
            Expectation::HeldExpired => seat.is_expired(now),
        };

        if !matched {
            return Err(CasError::Mismatch(seat.clone()));
        }

        match next {
            NextState::Held { holder, expires_at } => {
                seat.status = SeatStatus::Held;
                seat.holder = Some(holder);
                seat.hold_expires_at = Some(expires_at);
            }
            NextState::Sold => {
                seat.status = SeatStatus::Sold;
                seat.hold_expires_at = None;
            }
            NextState::Available => {
                seat.status = SeatStatus::Available;
                seat.holder = None;
                seat.hold_expires_at = None;
            }
        }
        seat.version += 1;

        on_commit(&seat);
        Ok(seat.clone())
    }

    /// Point-in-time read of all seats in ascending id order.
    ///
    /// Each seat is read atomically; the snapshot as a whole is not a
    /// single global atomic point.
    pub fn snapshot(&self) -> Vec<Seat> {
        self.ids
            .iter()
            .filter_map(|id| self.seats.get(id))
            .map(|slot| lock_seat(slot).clone())
            .collect()
    }
}

/// Lock a seat record, recovering the data if a previous panic poisoned
/// the mutex (the record itself is always left consistent: every write
/// path either fully applies a transition or leaves it untouched).
fn lock_seat(slot: &Mutex<Seat>) -> MutexGuard<'_, Seat> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
