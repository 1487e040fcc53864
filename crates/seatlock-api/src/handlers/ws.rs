//! WebSocket upgrade handler for live seat updates.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use seatlock_realtime::heartbeat::{HeartbeatConfig, run_heartbeat};
use seatlock_realtime::message::InboundMessage;

use crate::state::AppState;

/// GET /ws — WebSocket upgrade.
///
/// Every connection becomes one hub subscriber and receives every seat
/// transition from the moment of subscription onward; earlier state is
/// available through `GET /api/seats`.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Drives an established WebSocket connection.
async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.hub.subscribe();
    let subscriber_id = handle.id;

    info!(subscriber_id = %subscriber_id, "WebSocket connection established");

    // Forward hub messages to the socket.
    let forward_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize outbound message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Liveness pings, independent of seat traffic.
    let heartbeat_task = tokio::spawn(run_heartbeat(
        handle.clone(),
        HeartbeatConfig::from(&state.config.realtime),
    ));

    // Process inbound messages until the client goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<InboundMessage>(text.as_str())
            {
                Ok(InboundMessage::Pong { .. }) => handle.record_pong().await,
                Err(e) => {
                    debug!(subscriber_id = %subscriber_id, error = %e, "Ignoring unparseable message");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(subscriber_id = %subscriber_id, error = %e, "WebSocket error");
                break;
            }
        }

        if !handle.is_alive() {
            break;
        }
    }

    heartbeat_task.abort();
    forward_task.abort();
    state.hub.unsubscribe(&subscriber_id);

    info!(subscriber_id = %subscriber_id, "WebSocket connection closed");
}
