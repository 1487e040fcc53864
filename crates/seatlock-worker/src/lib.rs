//! # seatlock-worker
//!
//! Background tasks for SeatLock. Currently a single recurring task:
//! the expiry sweeper, which reclaims seats whose hold TTL lapsed
//! without a confirm.

pub mod sweeper;

pub use sweeper::ExpirySweeper;
