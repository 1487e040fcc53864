//! End-to-end hold/confirm/expiry flows through the lock manager.

use chrono::{Duration, Utc};

use seatlock_core::error::ErrorKind;
use seatlock_core::types::id::{SeatId, UserId};
use seatlock_core::types::seat::SeatStatus;

use crate::helpers::build_stack;

#[test]
fn test_contended_hold_and_confirm_cycle() {
    let stack = build_stack(5, Duration::seconds(120));
    let seat = SeatId::new(1);

    // User 10 gets the seat.
    let held = stack.locks.hold(seat, UserId::new(10)).unwrap();
    assert_eq!(held.status, SeatStatus::Held);

    // User 20 contends and loses.
    let err = stack.locks.hold(seat, UserId::new(20)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::SeatUnavailable);

    // User 10 confirms; the sale is terminal.
    let sold = stack.locks.confirm(seat, UserId::new(10)).unwrap();
    assert_eq!(sold.status, SeatStatus::Sold);

    let err = stack.locks.confirm(seat, UserId::new(10)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotHeld);
}

#[test]
fn test_expired_hold_is_reclaimed_by_sweep() {
    let stack = build_stack(3, Duration::seconds(2));
    let seat = SeatId::new(2);
    let user = UserId::new(5);

    stack.locks.hold(seat, user).unwrap();

    // No confirm within the TTL; the sweep reclaims the seat.
    let swept = stack.locks.expire_sweep(Utc::now() + Duration::seconds(3));
    assert_eq!(swept, vec![seat]);

    let snapshot = stack.locks.snapshot();
    assert_eq!(snapshot[1].status, SeatStatus::Available);
    assert_eq!(snapshot[1].holder, None);

    // A late confirm now sees an available seat.
    let err = stack.locks.confirm(seat, user).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotHeld);
}

#[test]
fn test_expired_confirm_before_sweep_reports_hold_expired() {
    // Zero TTL: the hold lapses the instant it is placed.
    let stack = build_stack(1, Duration::zero());
    let seat = SeatId::new(1);
    let user = UserId::new(5);

    stack.locks.hold(seat, user).unwrap();
    let err = stack.locks.confirm(seat, user).unwrap_err();
    assert_eq!(err.kind, ErrorKind::HoldExpired);

    // The seat is still formally held until the sweep runs.
    assert_eq!(stack.locks.snapshot()[0].status, SeatStatus::Held);
    assert_eq!(stack.locks.expire_sweep(Utc::now()), vec![seat]);
    assert_eq!(stack.locks.snapshot()[0].status, SeatStatus::Available);
}

#[test]
fn test_versions_increase_and_resweep_is_noop() {
    let stack = build_stack(1, Duration::zero());
    let seat = SeatId::new(1);

    stack.locks.hold(seat, UserId::new(1)).unwrap();
    assert_eq!(stack.locks.snapshot()[0].version, 1);

    stack.locks.expire_sweep(Utc::now());
    assert_eq!(stack.locks.snapshot()[0].version, 2);

    // Sweeping an already-available seat bumps nothing.
    assert!(stack.locks.expire_sweep(Utc::now()).is_empty());
    assert_eq!(stack.locks.snapshot()[0].version, 2);

    stack.locks.hold(seat, UserId::new(2)).unwrap();
    assert_eq!(stack.locks.snapshot()[0].version, 3);
}

#[test]
fn test_release_makes_seat_holdable_again() {
    let stack = build_stack(1, Duration::seconds(120));
    let seat = SeatId::new(1);

    stack.locks.hold(seat, UserId::new(1)).unwrap();
    let err = stack.locks.release(seat, UserId::new(2)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotHolder);

    stack.locks.release(seat, UserId::new(1)).unwrap();
    let held = stack.locks.hold(seat, UserId::new(2)).unwrap();
    assert_eq!(held.holder, Some(UserId::new(2)));
}
