//! Infrastructure Layer - Adapters and process plumbing.
//!
//! This layer contains the shared registry, the sample generator and the
//! transports that expose the session handlers.

/// Subscription registry feeding per-subscriber queues.
pub mod broadcast;

/// Configuration loaded from the environment.
pub mod config;

/// Periodic metric sample producer.
pub mod generator;

/// gRPC server implementation.
pub mod grpc;

/// Health check HTTP endpoint.
pub mod health;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// OpenTelemetry tracing integration.
pub mod telemetry;
