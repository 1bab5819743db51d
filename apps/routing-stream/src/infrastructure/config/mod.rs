//! Configuration Module
//!
//! Configuration loading for the routing stream service.

mod settings;

pub use settings::{ConfigError, GeneratorSettings, ServerConfig, ServerSettings, SessionSettings};
