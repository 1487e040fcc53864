//! Fan-out behavior: which subscribers see which transitions, and in
//! what order.

use chrono::{Duration, Utc};
use tokio::sync::mpsc;

use seatlock_core::types::id::{SeatId, UserId};
use seatlock_core::types::seat::SeatStatus;
use seatlock_realtime::OutboundMessage;

use crate::helpers::build_stack;

/// Drain every immediately available seat update from a receiver.
fn drain(rx: &mut mpsc::Receiver<OutboundMessage>) -> Vec<OutboundMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

#[tokio::test]
async fn test_connected_subscribers_each_get_one_event() {
    let stack = build_stack(5, Duration::seconds(120));
    let (_h1, mut rx1) = stack.hub.subscribe();
    let (_h2, mut rx2) = stack.hub.subscribe();

    stack.locks.hold(SeatId::new(3), UserId::new(7)).unwrap();

    for rx in [&mut rx1, &mut rx2] {
        let messages = drain(rx);
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            OutboundMessage::SeatUpdate {
                seat_id,
                status,
                user_id,
                version,
            } => {
                assert_eq!(*seat_id, SeatId::new(3));
                assert_eq!(*status, SeatStatus::Held);
                assert_eq!(*user_id, Some(UserId::new(7)));
                assert_eq!(*version, 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_late_subscriber_sees_state_via_snapshot_only() {
    let stack = build_stack(5, Duration::seconds(120));

    stack.locks.hold(SeatId::new(3), UserId::new(7)).unwrap();

    // Connecting after the transition yields no event for it...
    let (_handle, mut rx) = stack.hub.subscribe();
    assert!(drain(&mut rx).is_empty());

    // ...but the snapshot query shows the held seat.
    let snapshot = stack.locks.snapshot();
    assert_eq!(snapshot[2].status, SeatStatus::Held);
    assert_eq!(snapshot[2].holder, Some(UserId::new(7)));
}

#[tokio::test]
async fn test_events_for_one_seat_arrive_in_version_order() {
    let stack = build_stack(2, Duration::seconds(120));
    let (_handle, mut rx) = stack.hub.subscribe();
    let seat = SeatId::new(1);

    stack.locks.hold(seat, UserId::new(1)).unwrap();
    stack.locks.release(seat, UserId::new(1)).unwrap();
    stack.locks.hold(seat, UserId::new(2)).unwrap();
    stack.locks.confirm(seat, UserId::new(2)).unwrap();
    // A transition on another seat may interleave freely.
    stack.locks.hold(SeatId::new(2), UserId::new(9)).unwrap();

    let versions: Vec<u64> = drain(&mut rx)
        .into_iter()
        .filter_map(|msg| match msg {
            OutboundMessage::SeatUpdate {
                seat_id, version, ..
            } if seat_id == seat => Some(version),
            _ => None,
        })
        .collect();
    assert_eq!(versions, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_sweep_emits_available_event() {
    let stack = build_stack(1, Duration::seconds(1));
    stack.locks.hold(SeatId::new(1), UserId::new(4)).unwrap();

    let (_handle, mut rx) = stack.hub.subscribe();
    stack.locks.expire_sweep(Utc::now() + Duration::seconds(2));

    let messages = drain(&mut rx);
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        OutboundMessage::SeatUpdate {
            status, user_id, ..
        } => {
            assert_eq!(*status, SeatStatus::Available);
            assert_eq!(*user_id, None);
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[tokio::test]
async fn test_disconnected_subscriber_does_not_affect_others() {
    let stack = build_stack(1, Duration::seconds(120));
    let (_h1, rx1) = stack.hub.subscribe();
    let (_h2, mut rx2) = stack.hub.subscribe();

    drop(rx1);
    stack.locks.hold(SeatId::new(1), UserId::new(1)).unwrap();

    // The dead subscriber was pruned; the live one got the event.
    assert_eq!(stack.hub.subscriber_count(), 1);
    assert_eq!(drain(&mut rx2).len(), 1);
}
