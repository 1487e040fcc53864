//! Health check handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use seatlock_core::types::seat::SeatStatus;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let snapshot = state.locks.snapshot();
    let count = |status: SeatStatus| snapshot.iter().filter(|s| s.status == status).count();

    Json(DetailedHealthResponse {
        status: "ok".to_string(),
        seats_total: snapshot.len(),
        seats_available: count(SeatStatus::Available),
        seats_held: count(SeatStatus::Held),
        seats_sold: count(SeatStatus::Sold),
        subscribers: state.hub.subscriber_count(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}
