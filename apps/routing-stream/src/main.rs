//! Routing Stream Binary
//!
//! Starts the metric sample generator, the gRPC routing service and the
//! health server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin routing-stream
//! ```
//!
//! # Environment Variables
//!
//! - `ROUTING_GRPC_PORT`: gRPC server port (default: 50051)
//! - `ROUTING_HEALTH_PORT`: Health check HTTP port (default: 8083)
//! - `ROUTING_TICK_INTERVAL_MS`: Generator interval (default: 300)
//! - `ROUTING_SUBSCRIBER_CAPACITY`: Queue capacity per subscriber (default: 100)
//! - `ROUTING_OUTBOUND_CAPACITY`: Response stream buffer (default: 16)
//! - `ROUTING_BIDI_RESPONSES`: Replies per bidi call (default: 3)
//! - `ROUTING_BIDI_PACING_MS`: Delay after each bidi reply (default: 100)
//! - `ROUTING_SAMPLE_SOURCE` / `ROUTING_SAMPLE_DESTINATION`: Sample endpoints
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: routing-stream)
//! - `RUST_LOG`: Log filter (default: `routing_stream=info`)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use routing_stream::infrastructure::telemetry;
use routing_stream::{
    HealthServer, HealthServerState, RandomSampleSource, RoutingServer, SampleGenerator,
    ServerConfig, SubscriptionRegistry, init_metrics, serve_grpc,
};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    // Initialize telemetry (tracing + optional OTLP)
    let _telemetry_guard = telemetry::init();

    tracing::info!("Starting routing stream");

    // Initialize Prometheus metrics
    let _metrics_handle = init_metrics();

    let config = ServerConfig::from_env()?;
    log_config(&config);

    let shutdown_token = CancellationToken::new();
    let registry = Arc::new(SubscriptionRegistry::new());

    // Start the sample generator
    let generator_config = config.generator_config();
    let generator = SampleGenerator::new(
        &generator_config,
        RandomSampleSource::from_config(&generator_config),
        Arc::clone(&registry),
        shutdown_token.clone(),
    )
    .spawn();

    // Initialize gRPC server
    let grpc_server = RoutingServer::new(
        config.routing_config(),
        Arc::clone(&registry),
        shutdown_token.clone(),
    );

    // Spawn health server
    let health_state = Arc::new(HealthServerState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        Arc::clone(&registry),
        grpc_server.sessions(),
    ));
    let health_server = HealthServer::new(
        config.server.health_port,
        health_state,
        shutdown_token.clone(),
    );
    tokio::spawn(async move {
        if let Err(e) = health_server.run().await {
            tracing::error!(error = %e, "Health server error");
        }
    });

    // Spawn gRPC server
    let grpc_addr = SocketAddr::from(([0, 0, 0, 0], config.server.grpc_port));
    let grpc_listener = TcpListener::bind(grpc_addr).await?;
    let grpc_shutdown = shutdown_token.clone();
    let grpc = tokio::spawn(async move {
        tracing::info!(addr = %grpc_addr, "gRPC server listening");
        if let Err(e) = serve_grpc(grpc_server, grpc_listener, grpc_shutdown.clone()).await {
            tracing::error!(error = %e, "gRPC server error");
            grpc_shutdown.cancel();
        }
        tracing::info!("gRPC server stopped");
    });

    tracing::info!("Routing stream ready");

    await_shutdown(shutdown_token).await;

    let drained = tokio::time::timeout(SHUTDOWN_TIMEOUT, async {
        let report = generator.await;
        if let Err(e) = grpc.await {
            tracing::error!(error = %e, "gRPC server task failed");
        }
        report
    })
    .await;

    match drained {
        Ok(Ok(report)) => tracing::info!(ticks = report.ticks, "Routing stream stopped"),
        Ok(Err(e)) => tracing::error!(error = %e, "Generator task failed"),
        Err(_) => tracing::warn!(
            timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
            "Shutdown timed out"
        ),
    }

    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &ServerConfig) {
    tracing::info!(
        grpc_port = config.server.grpc_port,
        health_port = config.server.health_port,
        tick_interval_ms = config.generator.tick_interval.as_millis(),
        "Configuration loaded"
    );
    tracing::debug!(
        source = %config.generator.source,
        destination = %config.generator.destination,
        subscriber_capacity = config.session.subscriber_capacity,
        outbound_capacity = config.session.outbound_capacity,
        bidi_responses = config.session.bidi_responses,
        bidi_pacing_ms = config.session.bidi_pacing.as_millis(),
        "Session settings"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT), or for a server to fail.
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
        () = shutdown_token.cancelled() => {
            tracing::warn!("Server failed, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
