//! Health Check and Metrics Endpoint
//!
//! HTTP endpoint for health checks, registry and session reporting, and
//! Prometheus metrics.
//!
//! # Endpoints
//!
//! - `GET /health` - Returns JSON health status
//! - `GET /healthz` - Liveness check (simple OK)
//! - `GET /readyz` - Readiness check (generator has produced a sample)
//! - `GET /metrics` - Prometheus metrics in text format

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::domain::subscription::RegistryStats;
use crate::infrastructure::broadcast::SharedRegistry;
use crate::infrastructure::grpc::server::{SessionCounters, SessionSnapshot};
use crate::infrastructure::metrics::get_metrics_handle;

// =============================================================================
// Health Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Service version.
    pub version: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Current time.
    pub current_time: DateTime<Utc>,
    /// Registry statistics.
    pub registry: RegistryStatus,
    /// Live sessions per call shape.
    pub sessions: SessionSnapshot,
}

/// Overall health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Generator is producing samples.
    Healthy,
    /// Serving, but no sample has been produced yet.
    Starting,
}

/// Registry statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegistryStatus {
    /// Registered subscribers.
    pub subscribers: usize,
    /// Samples fanned out since start.
    pub samples_broadcast: u64,
    /// Samples accepted by subscriber queues.
    pub deliveries: u64,
    /// Samples dropped on full queues.
    pub drops: u64,
}

impl From<RegistryStats> for RegistryStatus {
    fn from(stats: RegistryStats) -> Self {
        Self {
            subscribers: stats.subscribers,
            samples_broadcast: stats.samples_broadcast,
            deliveries: stats.deliveries,
            drops: stats.drops,
        }
    }
}

// =============================================================================
// Health Server State
// =============================================================================

/// Shared state for the health server.
pub struct HealthServerState {
    version: String,
    started_at: Instant,
    registry: SharedRegistry,
    sessions: Arc<SessionCounters>,
}

impl HealthServerState {
    /// Create new health server state.
    #[must_use]
    pub fn new(version: String, registry: SharedRegistry, sessions: Arc<SessionCounters>) -> Self {
        Self {
            version,
            started_at: Instant::now(),
            registry,
            sessions,
        }
    }
}

// =============================================================================
// Health Server
// =============================================================================

/// Health check HTTP server.
pub struct HealthServer {
    port: u16,
    state: Arc<HealthServerState>,
    cancel: CancellationToken,
}

impl HealthServer {
    /// Create a new health server.
    #[must_use]
    pub const fn new(port: u16, state: Arc<HealthServerState>, cancel: CancellationToken) -> Self {
        Self {
            port,
            state,
            cancel,
        }
    }

    /// Run the health server until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `HealthServerError` if binding fails or the HTTP server
    /// encounters a fatal error while running.
    pub async fn run(self) -> Result<(), HealthServerError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| HealthServerError::BindFailed(self.port, e.to_string()))?;

        tracing::info!(port = self.port, "Health server listening");

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(self.cancel.cancelled_owned())
            .await
            .map_err(|e| HealthServerError::ServerFailed(e.to_string()))?;

        tracing::info!("Health server stopped");
        Ok(())
    }
}

fn router(state: Arc<HealthServerState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(liveness_handler))
        .route("/readyz", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

// =============================================================================
// HTTP Handlers
// =============================================================================

async fn health_handler(State(state): State<Arc<HealthServerState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(build_health_response(&state)))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn readiness_handler(State(state): State<Arc<HealthServerState>>) -> impl IntoResponse {
    if is_ready(&state.registry.stats()) {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            let body = handle.render();
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                body,
            )
        },
    )
}

fn build_health_response(state: &HealthServerState) -> HealthResponse {
    let stats = state.registry.stats();

    HealthResponse {
        status: determine_health_status(&stats),
        version: state.version.clone(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        current_time: Utc::now(),
        registry: stats.into(),
        sessions: state.sessions.snapshot(),
    }
}

const fn is_ready(stats: &RegistryStats) -> bool {
    stats.samples_broadcast > 0
}

const fn determine_health_status(stats: &RegistryStats) -> HealthStatus {
    if is_ready(stats) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Starting
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Health server errors.
#[derive(Debug, thiserror::Error)]
pub enum HealthServerError {
    /// Failed to bind to port.
    #[error("failed to bind to port {0}: {1}")]
    BindFailed(u16, String),

    /// Server error.
    #[error("server error: {0}")]
    ServerFailed(String),
}

// =============================================================================
// Tests
// =============================================================================
