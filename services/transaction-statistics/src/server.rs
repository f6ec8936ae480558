//! HTTP server wiring and the fixed-rate eviction driver.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{debug, error, info};

use crate::{
    config::StatisticsConfig,
    models::{HealthResponse, StatisticsResponse, TransactionRequest},
    service::{RecordOutcome, StatisticsService},
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Sliding-window aggregator
    pub service: Arc<StatisticsService>,
    /// Server start time for uptime reporting
    pub start_time: Instant,
}

/// HTTP server for the transaction statistics service.
pub struct StatisticsServer {
    config: StatisticsConfig,
    service: Arc<StatisticsService>,
}

impl StatisticsServer {
    /// Create a new server from configuration.
    pub fn new(config: StatisticsConfig) -> Result<Self> {
        let service = Arc::new(StatisticsService::new(config.window_secs)?);
        Ok(Self { config, service })
    }

    /// Start the eviction task and serve until the listener fails.
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .server_address()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

        start_evictor(
            Arc::clone(&self.service),
            Duration::from_millis(self.config.eviction_interval_ms),
        );

        let app = create_app(
            Arc::clone(&self.service),
            Duration::from_secs(self.config.server.timeout_seconds),
        );

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("TCP listener bound to {}", addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind TCP listener to {}: {}", addr, e);
                return Err(anyhow::anyhow!("Failed to bind to address {}: {}", addr, e));
            }
        };

        info!("Transaction statistics server listening on {}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server encountered a fatal error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        Ok(())
    }
}

/// Build the router with all routes and middleware.
pub fn create_app(service: Arc<StatisticsService>, timeout: Duration) -> Router {
    let state = AppState {
        service,
        start_time: Instant::now(),
    };

    Router::new()
        .route("/transactions", post(add_transaction))
        .route("/statistics", get(get_statistics))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Spawn the fixed-rate eviction pass.
pub fn start_evictor(service: Arc<StatisticsService>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;
            service.run_eviction_pass();
        }
    });
}

async fn add_transaction(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> StatusCode {
    if !request.is_well_formed() {
        debug!(?request, "malformed transaction rejected");
        return StatusCode::BAD_REQUEST;
    }

    match state.service.record(request.amount, request.timestamp) {
        Ok(RecordOutcome::Accepted) => StatusCode::CREATED,
        Ok(RecordOutcome::OutOfWindow) => StatusCode::NO_CONTENT,
        Err(e) => {
            error!("Failed to record transaction: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn get_statistics(State(state): State<AppState>) -> Json<StatisticsResponse> {
    Json(state.service.snapshot().into())
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
