//! Lock manager — the seat state machine over the registry.
//!
//! ```text
//! Available --hold(user)--> Held(user, ttl)
//! Held(user) --confirm(user)--> Sold(user)
//! Held(user) --release(user) | expiry--> Available
//! Sold --(terminal)--
//! ```
//!
//! Every successful transition emits exactly one [`SeatUpdate`] through
//! the configured [`SeatEventSink`]; failures are routine typed errors
//! and emit nothing.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use seatlock_core::error::AppError;
use seatlock_core::events::{SeatEventSink, SeatUpdate};
use seatlock_core::result::AppResult;
use seatlock_core::types::id::{SeatId, UserId};
use seatlock_core::types::seat::{Seat, SeatStatus};

use crate::registry::{CasError, Expectation, NextState, SeatRegistry};

/// Arbitrates competing hold/confirm/release/expire operations on the
/// shared seat pool. Cheap to share behind an `Arc`; all methods take
/// `&self` and complete in bounded time without I/O.
pub struct LockManager {
    /// The seat records this manager exclusively owns.
    registry: Arc<SeatRegistry>,
    /// Where transition events are published.
    events: Arc<dyn SeatEventSink>,
    /// How long a hold lasts.
    hold_ttl: Duration,
}

impl std::fmt::Debug for LockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockManager")
            .field("seats", &self.registry.len())
            .field("hold_ttl", &self.hold_ttl)
            .finish()
    }
}

impl LockManager {
    /// Create a manager over `registry`, publishing transitions to
    /// `events`, with holds lasting `hold_ttl`.
    pub fn new(
        registry: Arc<SeatRegistry>,
        events: Arc<dyn SeatEventSink>,
        hold_ttl: Duration,
    ) -> Self {
        Self {
            registry,
            events,
            hold_ttl,
        }
    }

    /// Place a hold on an available seat for `user_id`.
    ///
    /// Fails with `SeatUnavailable` if the seat is held by anyone
    /// (including `user_id` re-requesting, and holds that have lapsed
    /// but not yet been swept) or sold.
    pub fn hold(&self, seat_id: SeatId, user_id: UserId) -> AppResult<Seat> {
        self.hold_at(seat_id, user_id, Utc::now())
    }

    /// Convert `user_id`'s unexpired hold into a sale.
    pub fn confirm(&self, seat_id: SeatId, user_id: UserId) -> AppResult<Seat> {
        self.confirm_at(seat_id, user_id, Utc::now())
    }

    /// Voluntarily release `user_id`'s hold, returning the seat to the
    /// pool.
    pub fn release(&self, seat_id: SeatId, user_id: UserId) -> AppResult<Seat> {
        self.release_at(seat_id, user_id, Utc::now())
    }

    /// Reclaim every seat whose hold lapsed at or before `now`.
    ///
    /// Returns the ids of the seats transitioned. Seats that were
    /// concurrently confirmed or released lose the race inside the
    /// registry primitive and are silently skipped; sweeping an
    /// already-available seat is a no-op with no event and no version
    /// bump.
    pub fn expire_sweep(&self, now: DateTime<Utc>) -> Vec<SeatId> {
        let mut reclaimed = Vec::new();

        for &seat_id in self.registry.seat_ids() {
            let result = self.registry.compare_and_transition(
                seat_id,
                Expectation::HeldExpired,
                NextState::Available,
                now,
                |seat| self.events.publish(SeatUpdate::from_seat(seat)),
            );
            if let Ok(seat) = result {
                debug!(seat_id = %seat_id, version = seat.version, "Expired hold reclaimed");
                reclaimed.push(seat_id);
            }
        }

        reclaimed
    }

    /// Read-only projection of every seat, in ascending id order.
    pub fn snapshot(&self) -> Vec<Seat> {
        self.registry.snapshot()
    }

    fn hold_at(&self, seat_id: SeatId, user_id: UserId, now: DateTime<Utc>) -> AppResult<Seat> {
        let expires_at = now + self.hold_ttl;
        let result = self.registry.compare_and_transition(
            seat_id,
            Expectation::Available,
            NextState::Held {
                holder: user_id,
                expires_at,
            },
            now,
            |seat| self.events.publish(SeatUpdate::from_seat(seat)),
        );

        match result {
            Ok(seat) => {
                debug!(seat_id = %seat_id, user_id = %user_id, version = seat.version, "Seat held");
                Ok(seat)
            }
            Err(CasError::NotFound(id)) => Err(unknown_seat(id)),
            Err(CasError::Mismatch(actual)) => Err(AppError::seat_unavailable(format!(
                "Seat {seat_id} is {}",
                actual.status
            ))),
        }
    }

    fn confirm_at(&self, seat_id: SeatId, user_id: UserId, now: DateTime<Utc>) -> AppResult<Seat> {
        let result = self.registry.compare_and_transition(
            seat_id,
            Expectation::HeldByUnexpired(user_id),
            NextState::Sold,
            now,
            |seat| self.events.publish(SeatUpdate::from_seat(seat)),
        );

        match result {
            Ok(seat) => {
                debug!(seat_id = %seat_id, user_id = %user_id, version = seat.version, "Seat sold");
                Ok(seat)
            }
            Err(CasError::NotFound(id)) => Err(unknown_seat(id)),
            Err(CasError::Mismatch(actual)) => Err(classify_held_failure(&actual, user_id, true)),
        }
    }

    fn release_at(&self, seat_id: SeatId, user_id: UserId, now: DateTime<Utc>) -> AppResult<Seat> {
        let result = self.registry.compare_and_transition(
            seat_id,
            Expectation::HeldBy(user_id),
            NextState::Available,
            now,
            |seat| self.events.publish(SeatUpdate::from_seat(seat)),
        );

        match result {
            Ok(seat) => {
                debug!(seat_id = %seat_id, user_id = %user_id, version = seat.version, "Seat released");
                Ok(seat)
            }
            Err(CasError::NotFound(id)) => Err(unknown_seat(id)),
            Err(CasError::Mismatch(actual)) => Err(classify_held_failure(&actual, user_id, false)),
        }
    }
}

fn unknown_seat(seat_id: SeatId) -> AppError {
    AppError::seat_not_found(format!("Seat {seat_id} is not registered"))
}

/// Map a failed confirm/release to its reason, from the seat record as
/// it was observed inside the critical section.
///
/// Holder identity is checked before expiry: a non-holder is told
/// `NotHolder` even when the hold has lapsed. `HoldExpired` can only
/// arise on confirm (`expiry_matters`); release accepts lapsed holds.
fn classify_held_failure(actual: &Seat, user_id: UserId, expiry_matters: bool) -> AppError {
    match actual.status {
        SeatStatus::Available | SeatStatus::Sold => AppError::not_held(format!(
            "Seat {} is {}, not held",
            actual.seat_id, actual.status
        )),
        SeatStatus::Held if actual.holder != Some(user_id) => AppError::not_holder(format!(
            "Seat {} is held by another user",
            actual.seat_id
        )),
        SeatStatus::Held if expiry_matters => AppError::hold_expired(format!(
            "Hold on seat {} has expired",
            actual.seat_id
        )),
        SeatStatus::Held => AppError::internal(format!(
            "Seat {} release mismatch with matching holder",
            actual.seat_id
        )),
    }
}
