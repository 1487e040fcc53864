//! Wire-level tests through the Axum router.

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use crate::helpers::{build_test_router, request};

#[tokio::test]
async fn test_hold_conflict_maps_to_409() {
    let (router, _stack) = build_test_router(5, Duration::seconds(120));

    let (status, body) = request(
        &router,
        "POST",
        "/api/hold",
        Some(json!({"seat_id": 1, "user_id": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "held");
    assert_eq!(body["seat_id"], 1);

    let (status, body) = request(
        &router,
        "POST",
        "/api/hold",
        Some(json!({"seat_id": 1, "user_id": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "SEAT_UNAVAILABLE");
}

#[tokio::test]
async fn test_confirm_error_codes() {
    let (router, _stack) = build_test_router(5, Duration::seconds(120));

    request(
        &router,
        "POST",
        "/api/hold",
        Some(json!({"seat_id": 2, "user_id": 10})),
    )
    .await;

    // Wrong user.
    let (status, body) = request(
        &router,
        "POST",
        "/api/confirm",
        Some(json!({"seat_id": 2, "user_id": 11})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NOT_HOLDER");

    // Right user.
    let (status, body) = request(
        &router,
        "POST",
        "/api/confirm",
        Some(json!({"seat_id": 2, "user_id": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sold");

    // Sold is terminal.
    let (status, body) = request(
        &router,
        "POST",
        "/api/confirm",
        Some(json!({"seat_id": 2, "user_id": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NOT_HELD");
}

#[tokio::test]
async fn test_unknown_seat_maps_to_404() {
    let (router, _stack) = build_test_router(5, Duration::seconds(120));

    let (status, body) = request(
        &router,
        "POST",
        "/api/hold",
        Some(json!({"seat_id": 999, "user_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "SEAT_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_ids_fail_validation() {
    let (router, _stack) = build_test_router(5, Duration::seconds(120));

    let (status, body) = request(
        &router,
        "POST",
        "/api/hold",
        Some(json!({"seat_id": 0, "user_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_seat_map_uses_integer_encoding() {
    let (router, stack) = build_test_router(3, Duration::seconds(120));

    use seatlock_core::types::id::{SeatId, UserId};
    stack.locks.hold(SeatId::new(1), UserId::new(10)).unwrap();
    stack.locks.hold(SeatId::new(2), UserId::new(11)).unwrap();
    stack.locks.confirm(SeatId::new(2), UserId::new(11)).unwrap();

    let (status, body) = request(&router, "GET", "/api/seats", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().expect("seat map should be an array");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["seat_id"], 1);
    assert_eq!(entries[0]["status"], 1);
    assert_eq!(entries[0]["user_id"], 10);
    assert_eq!(entries[1]["status"], 2);
    assert_eq!(entries[2]["status"], 0);
    assert!(entries[2]["user_id"].is_null());
}

#[tokio::test]
async fn test_health_endpoints() {
    let (router, _stack) = build_test_router(4, Duration::seconds(120));

    let (status, body) = request(&router, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = request(&router, "GET", "/api/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seats_total"], 4);
    assert_eq!(body["seats_available"], 4);
    assert_eq!(body["subscribers"], 0);
}
