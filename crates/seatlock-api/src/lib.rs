//! # seatlock-api
//!
//! HTTP API layer for SeatLock built on Axum.
//!
//! Provides the REST endpoints (hold/confirm/release/seat map/health),
//! the WebSocket upgrade for live seat updates, DTOs, and the mapping
//! from domain errors to HTTP responses. Contains no seat logic of its
//! own; every operation is a thin call into the lock manager or the
//! update hub.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
