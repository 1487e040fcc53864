//! # seatlock-realtime
//!
//! Notification fan-out for SeatLock. Provides:
//!
//! - A subscriber registry with per-subscriber buffered delivery
//! - Broadcast of every seat transition to all connected observers,
//!   preserving per-seat version order
//! - Ping/pong heartbeat for WebSocket liveness
//!
//! Delivery to one subscriber is independent of every other: a dead
//! observer is removed from the registry, a slow one drops messages,
//! and neither ever blocks a seat transition.

pub mod heartbeat;
pub mod hub;
pub mod message;
pub mod subscriber;

pub use hub::UpdateHub;
pub use message::{InboundMessage, OutboundMessage};
pub use subscriber::{SubscriberHandle, SubscriberId};
