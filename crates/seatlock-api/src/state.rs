//! Application state shared across all handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use seatlock_core::config::AppConfig;
use seatlock_locks::LockManager;
use seatlock_realtime::UpdateHub;

/// Application state containing all shared dependencies.
///
/// Constructed once in `main` and passed to every Axum handler via
/// `State<AppState>`. All fields are `Arc`-wrapped for cheap cloning
/// across tasks; there is no module-level global state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Seat lock manager.
    pub locks: Arc<LockManager>,
    /// Real-time update hub.
    pub hub: Arc<UpdateHub>,
    /// When the server started, for health reporting.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Assemble the state from its constructed service objects.
    pub fn new(config: Arc<AppConfig>, locks: Arc<LockManager>, hub: Arc<UpdateHub>) -> Self {
        Self {
            config,
            locks,
            hub,
            started_at: Utc::now(),
        }
    }
}
