//! Seat operation handlers: hold, confirm, release, and the seat map.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use seatlock_core::error::AppError;

use crate::dto::request::SeatActionRequest;
use crate::dto::response::{SeatActionResponse, SeatMapEntry};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/hold — place a temporary hold on a seat.
pub async fn hold_seat(
    State(state): State<AppState>,
    Json(req): Json<SeatActionRequest>,
) -> Result<Json<SeatActionResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let seat = state.locks.hold(req.seat(), req.user())?;
    Ok(Json(SeatActionResponse::from_seat(&seat)))
}

/// POST /api/confirm — convert a hold into a sale.
pub async fn confirm_seat(
    State(state): State<AppState>,
    Json(req): Json<SeatActionRequest>,
) -> Result<Json<SeatActionResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let seat = state.locks.confirm(req.seat(), req.user())?;
    Ok(Json(SeatActionResponse::from_seat(&seat)))
}

/// POST /api/release — voluntarily release a hold.
pub async fn release_seat(
    State(state): State<AppState>,
    Json(req): Json<SeatActionRequest>,
) -> Result<Json<SeatActionResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let seat = state.locks.release(req.seat(), req.user())?;
    Ok(Json(SeatActionResponse::from_seat(&seat)))
}

/// GET /api/seats — ordered snapshot of every seat.
pub async fn get_seat_map(State(state): State<AppState>) -> Json<Vec<SeatMapEntry>> {
    let entries = state
        .locks
        .snapshot()
        .iter()
        .map(SeatMapEntry::from)
        .collect();
    Json(entries)
}
