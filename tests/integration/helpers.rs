//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use seatlock_api::{AppState, build_router};
use seatlock_core::config::AppConfig;
use seatlock_core::types::id::SeatId;
use seatlock_locks::{LockManager, SeatRegistry};
use seatlock_realtime::UpdateHub;

/// The wired service objects a test exercises.
pub struct TestStack {
    /// Seat lock manager.
    pub locks: Arc<LockManager>,
    /// Update hub the manager publishes into.
    pub hub: Arc<UpdateHub>,
}

/// Build a registry, hub, and lock manager over `seats` seats with the
/// given hold TTL.
pub fn build_stack(seats: u32, ttl: Duration) -> TestStack {
    let registry = Arc::new(SeatRegistry::new((1..=seats).map(SeatId::new)));
    let hub = Arc::new(UpdateHub::new(64));
    let locks = Arc::new(LockManager::new(registry, hub.clone(), ttl));
    TestStack { locks, hub }
}

/// Build the full router over a fresh stack, for wire-level tests.
pub fn build_test_router(seats: u32, ttl: Duration) -> (Router, TestStack) {
    let stack = build_stack(seats, ttl);
    let config = Arc::new(AppConfig::default());
    let state = AppState::new(config, stack.locks.clone(), stack.hub.clone());
    (build_router(state), stack)
}

/// Send one JSON request through the router and decode the JSON reply.
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };

    (status, value)
}
