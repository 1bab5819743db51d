//! OpenTelemetry Tracing Integration
//!
//! Installs the `tracing` subscriber: an `EnvFilter`, a fmt layer and, when
//! enabled, an OTLP span exporter.
//!
//! # Environment Variables
//!
//! - `OTEL_ENABLED`: Set to "true" to export spans (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC endpoint (default: http://localhost:4317)
//! - `OTEL_SERVICE_NAME`: Service name for traces (default: routing-stream)
//! - `RUST_LOG`: Filter directives (default: `routing_stream=info,h2=warn,hyper=warn`)

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_SERVICE_NAME: &str = "routing-stream";

const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

const DEFAULT_FILTER: &str = "routing_stream=info,tower_http=info,h2=warn,hyper=warn";

/// Guard that shuts down OpenTelemetry when dropped.
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.tracer_provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to shutdown OpenTelemetry tracer provider: {e}");
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Whether span export is enabled.
    pub enabled: bool,
    /// OTLP exporter endpoint.
    pub otlp_endpoint: String,
    /// Service name for traces.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            enabled: lookup("OTEL_ENABLED").is_some_and(|v| v.eq_ignore_ascii_case("true")),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or(defaults.otlp_endpoint),
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

/// Initialize telemetry with configuration from the environment.
///
/// Returns a guard that must be kept alive for the duration of the program.
#[must_use]
pub fn init() -> TelemetryGuard {
    init_with_config(TelemetryConfig::from_env())
}

/// Initialize telemetry with custom configuration.
///
/// A subscriber that is already installed is left in place. If the OTLP
/// exporter cannot be built, logging continues without span export.
#[must_use]
pub fn init_with_config(config: TelemetryConfig) -> TelemetryGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let tracer_provider = if config.enabled {
        match build_tracer_provider(&config) {
            Ok(provider) => Some(provider),
            Err(e) => {
                eprintln!("OTLP exporter unavailable, continuing without span export: {e}");
                None
            }
        }
    } else {
        None
    };

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name.clone()))
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    TelemetryGuard { tracer_provider }
}

fn build_tracer_provider(
    config: &TelemetryConfig,
) -> Result<SdkTracerProvider, opentelemetry_otlp::ExporterBuildError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otlp_endpoint)
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            opentelemetry_sdk::Resource::builder()
                .with_service_name(config.service_name.clone())
                .build(),
        )
        .build())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_disables_export() {
        let config = TelemetryConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.otlp_endpoint, DEFAULT_OTLP_ENDPOINT);
        assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn lookup_overrides() {
        let config = TelemetryConfig::from_lookup(|key| match key {
            "OTEL_ENABLED" => Some("TRUE".to_string()),
            "OTEL_SERVICE_NAME" => Some("routing-test".to_string()),
            _ => None,
        });
        assert!(config.enabled);
        assert_eq!(config.service_name, "routing-test");
        assert_eq!(config.otlp_endpoint, DEFAULT_OTLP_ENDPOINT);
    }

    #[test]
    fn anything_but_true_keeps_export_off() {
        let config = TelemetryConfig::from_lookup(|key| {
            (key == "OTEL_ENABLED").then(|| "yes".to_string())
        });
        assert!(!config.enabled);
    }

    #[test]
    fn init_without_export_returns_idle_guard() {
        let guard = init_with_config(TelemetryConfig::default());
        assert!(!guard.is_exporting());
    }
}
