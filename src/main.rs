//! SeatLock Server — live seat-reservation engine.
//!
//! Main entry point that wires the registry, lock manager, update hub,
//! and expiry sweeper together and serves the HTTP/WebSocket API.

use std::sync::Arc;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use seatlock_api::AppState;
use seatlock_core::config::AppConfig;
use seatlock_core::error::AppError;
use seatlock_core::events::SeatEventSink;
use seatlock_locks::{LockManager, SeatRegistry};
use seatlock_realtime::UpdateHub;
use seatlock_worker::ExpirySweeper;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SEATLOCK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SeatLock v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);

    // ── Step 1: Seat registry from the venue map ─────────────────
    let registry = Arc::new(SeatRegistry::new(config.venue.seat_ids()));
    tracing::info!(seats = registry.len(), "Seat registry initialized");

    // ── Step 2: Update hub + lock manager ────────────────────────
    let hub = Arc::new(UpdateHub::new(config.realtime.channel_buffer_size));
    let events: Arc<dyn SeatEventSink> = hub.clone();
    let locks = Arc::new(LockManager::new(
        registry.clone(),
        events,
        config.holds.ttl(),
    ));
    tracing::info!(
        ttl_seconds = config.holds.ttl_seconds,
        "Lock manager initialized"
    );

    // ── Step 3: Expiry sweeper ───────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = ExpirySweeper::new(locks.clone(), config.holds.sweep_interval());
    let sweeper_handle = sweeper.spawn(shutdown_rx);

    // ── Step 4: HTTP/WebSocket server ────────────────────────────
    let state = AppState::new(config.clone(), locks, hub.clone());
    let app = seatlock_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("SeatLock server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Drain background work ────────────────────────────
    tracing::info!("Waiting for background tasks to complete...");

    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, sweeper_handle).await;
    hub.close_all();

    tracing::info!("SeatLock server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
