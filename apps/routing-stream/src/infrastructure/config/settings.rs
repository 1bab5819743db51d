//! Service Configuration Settings
//!
//! Configuration types for the routing stream service, loaded from
//! environment variables. Unparseable values fall back to their defaults.

use std::time::Duration;

use crate::domain::session::BidiPlan;
use crate::infrastructure::generator::GeneratorConfig;
use crate::infrastructure::grpc::server::RoutingServerConfig;

/// Server port settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// gRPC server port.
    pub grpc_port: u16,
    /// Health check HTTP port.
    pub health_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            grpc_port: 50051,
            health_port: 8083,
        }
    }
}

/// Sample generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Time between samples.
    pub tick_interval: Duration,
    /// Source identifier stamped on samples.
    pub source: String,
    /// Destination identifier stamped on samples.
    pub destination: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let config = GeneratorConfig::default();
        Self {
            tick_interval: config.interval,
            source: config.source,
            destination: config.destination,
        }
    }
}

/// Per-session queue and pacing settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Registry queue capacity per server-streaming subscriber.
    pub subscriber_capacity: usize,
    /// Buffer between a session task and its gRPC response stream.
    pub outbound_capacity: usize,
    /// Replies sent on each bidi call.
    pub bidi_responses: u32,
    /// Delay after each bidi reply.
    pub bidi_pacing: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        let plan = BidiPlan::default();
        Self {
            subscriber_capacity: 100,
            outbound_capacity: 16,
            bidi_responses: plan.responses,
            bidi_pacing: plan.pacing,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server port settings.
    pub server: ServerSettings,
    /// Sample generator settings.
    pub generator: GeneratorSettings,
    /// Session settings.
    pub session: SessionSettings,
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick interval is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick interval is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_defaults = ServerSettings::default();
        let server = ServerSettings {
            grpc_port: parse_or(&lookup, "ROUTING_GRPC_PORT", server_defaults.grpc_port),
            health_port: parse_or(&lookup, "ROUTING_HEALTH_PORT", server_defaults.health_port),
        };

        let generator_defaults = GeneratorSettings::default();
        let tick_interval = parse_duration_millis(
            &lookup,
            "ROUTING_TICK_INTERVAL_MS",
            generator_defaults.tick_interval,
        );
        if tick_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "ROUTING_TICK_INTERVAL_MS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        let generator = GeneratorSettings {
            tick_interval,
            source: non_empty_or(&lookup, "ROUTING_SAMPLE_SOURCE", generator_defaults.source),
            destination: non_empty_or(
                &lookup,
                "ROUTING_SAMPLE_DESTINATION",
                generator_defaults.destination,
            ),
        };

        let session_defaults = SessionSettings::default();
        let session = SessionSettings {
            subscriber_capacity: parse_or(
                &lookup,
                "ROUTING_SUBSCRIBER_CAPACITY",
                session_defaults.subscriber_capacity,
            ),
            outbound_capacity: parse_or(
                &lookup,
                "ROUTING_OUTBOUND_CAPACITY",
                session_defaults.outbound_capacity,
            ),
            bidi_responses: parse_or(
                &lookup,
                "ROUTING_BIDI_RESPONSES",
                session_defaults.bidi_responses,
            ),
            bidi_pacing: parse_duration_millis(
                &lookup,
                "ROUTING_BIDI_PACING_MS",
                session_defaults.bidi_pacing,
            ),
        };

        Ok(Self {
            server,
            generator,
            session,
        })
    }

    /// Generator configuration derived from these settings.
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            interval: self.generator.tick_interval,
            source: self.generator.source.clone(),
            destination: self.generator.destination.clone(),
        }
    }

    /// gRPC server configuration derived from these settings.
    #[must_use]
    pub fn routing_config(&self) -> RoutingServerConfig {
        RoutingServerConfig {
            subscriber_capacity: self.session.subscriber_capacity,
            outbound_capacity: self.session.outbound_capacity,
            bidi_plan: BidiPlan {
                responses: self.session.bidi_responses,
                pacing: self.session.bidi_pacing,
            },
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable holds a value the service cannot run with.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_duration_millis<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}

fn non_empty_or<F>(lookup: &F, key: &str, default: String) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty()).unwrap_or(default)
}
