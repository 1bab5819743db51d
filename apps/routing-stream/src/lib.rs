#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Routing Stream - Metric Event Distribution over gRPC
//!
//! A gRPC service built around a publish/subscribe hub: a periodic generator
//! produces metric samples and fans them out to one bounded queue per
//! streaming client. The service exposes all four RPC shapes (unary, client
//! streaming, server streaming and bidirectional streaming).
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Core data types with no I/O
//!   - `metric`: Metric samples and the listener event sum type
//!   - `subscription`: Subscriber identity and broadcast tallies
//!   - `session`: Client-stream summaries and bidi plans/outcomes
//!
//! - **Application**: Ports and the session handlers
//!   - `ports`: Inbound stream and sample source seams
//!   - `services`: Unary, client, server and bidi session handlers
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `broadcast`: Subscription registry (per-subscriber queues)
//!   - `generator`: Periodic sample generator
//!   - `grpc`: tonic adapter for `RoutingService`
//!   - `config`: Environment configuration
//!   - `health`: Health check HTTP endpoint
//!
//! # Data Flow
//!
//! ```text
//!                  ┌──────────────┐     ┌─────────────┐
//! Sample ────────► │ Subscription │──┬─►│  Session 1  │──► Client 1
//! Generator tick   │   Registry   │  ├─►│  Session 2  │──► Client 2
//!                  └──────────────┘  └─►│  Session N  │──► Client N
//!                                       └─────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Core types with no I/O.
pub mod domain;

/// Application layer - Ports and session handlers.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::metric::{ListenerEvent, MetricSample};
pub use domain::session::{BidiOutcome, BidiPlan, BidiReply, ClientStreamSummary, UnaryReply};
pub use domain::subscription::{BroadcastOutcome, RegistryStats, SubscriberId};

// Application
pub use application::ports::{InboundStream, SampleSource};
pub use application::services::{SessionEnd, SessionError};

// Infrastructure config
pub use infrastructure::config::{
    ConfigError, GeneratorSettings, ServerConfig, ServerSettings, SessionSettings,
};

// Subscription registry (for integration tests)
pub use infrastructure::broadcast::{SharedRegistry, Subscription, SubscriptionRegistry};

// Sample generator
pub use infrastructure::generator::{
    GeneratorConfig, GeneratorReport, RandomSampleSource, SampleGenerator,
};

// gRPC server (for integration tests)
pub use infrastructure::grpc::{
    proto::routing::v1 as proto,
    server::{RoutingServer, RoutingServerConfig, SessionCounters, serve as serve_grpc},
};

// Health server
pub use infrastructure::health::{HealthServer, HealthServerError, HealthServerState};

// Metrics
pub use infrastructure::metrics::{CallShape, init_metrics};

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryGuard, init as init_telemetry};
