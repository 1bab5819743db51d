//! Prometheus Metrics Module
//!
//! Exposes application metrics via Prometheus format for monitoring.
//!
//! # Metrics Categories
//!
//! - **Samples**: Samples generated by the generator
//! - **Fan-out**: Deliveries, drops on full queues, sends to closed queues
//! - **Subscribers**: Registered subscriber count
//! - **Sessions**: Live and finished sessions per call shape
//!
//! # Integration
//!
//! Metrics are exposed at `/metrics` on the health server port.

use std::sync::OnceLock;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::domain::subscription::BroadcastOutcome;

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// If another global recorder is already installed, the returned handle
/// renders an empty registry and recording goes to the existing recorder.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = match PrometheusBuilder::new().install_recorder() {
                Ok(handle) => handle,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to install Prometheus recorder");
                    PrometheusBuilder::new().build_recorder().handle()
                }
            };

            register_metrics();
            handle
        })
        .clone()
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "routing_samples_generated_total",
        "Total metric samples produced by the generator"
    );
    describe_counter!(
        "routing_deliveries_total",
        "Total samples accepted by subscriber queues"
    );
    describe_counter!(
        "routing_drops_total",
        "Total samples dropped because a subscriber queue was full"
    );
    describe_counter!(
        "routing_disconnected_sends_total",
        "Total samples addressed to a queue whose receiver was gone"
    );
    describe_gauge!(
        "routing_subscribers",
        "Number of registered subscribers"
    );
    describe_gauge!(
        "routing_active_sessions",
        "Number of live sessions by call shape"
    );
    describe_counter!(
        "routing_sessions_total",
        "Total finished sessions by call shape and end reason"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Metric label for the four RPC shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Unary call.
    Unary,
    /// Client-streaming call.
    ClientStreaming,
    /// Server-streaming call.
    ServerStreaming,
    /// Bidirectional streaming call.
    BidiStreaming,
}

impl CallShape {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unary => "unary",
            Self::ClientStreaming => "client_streaming",
            Self::ServerStreaming => "server_streaming",
            Self::BidiStreaming => "bidi_streaming",
        }
    }
}

/// Record one generated sample.
pub fn record_sample_generated() {
    counter!("routing_samples_generated_total").increment(1);
}

/// Record the fan-out tally of one broadcast.
pub fn record_broadcast(outcome: &BroadcastOutcome) {
    counter!("routing_deliveries_total").increment(outcome.delivered as u64);
    counter!("routing_drops_total").increment(outcome.dropped_full as u64);
    counter!("routing_disconnected_sends_total").increment(outcome.disconnected as u64);
}

/// Update the registered subscriber count.
#[allow(clippy::cast_precision_loss)]
pub fn set_subscribers(count: usize) {
    gauge!("routing_subscribers").set(count as f64);
}

/// Update the live session count for a call shape.
pub fn set_active_sessions(shape: CallShape, count: f64) {
    gauge!(
        "routing_active_sessions",
        "shape" => shape.as_str()
    )
    .set(count);
}

/// Record a finished session.
pub fn record_session_finished(shape: CallShape, end: &'static str) {
    counter!(
        "routing_sessions_total",
        "shape" => shape.as_str(),
        "end" => end
    )
    .increment(1);
}

// =============================================================================
// Tests
// =============================================================================
