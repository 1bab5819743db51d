//! gRPC Server
//!
//! Implements the `RoutingService` gRPC service on top of the session
//! handlers.
//!
//! # Architecture
//!
//! Each call is adapted to its handler:
//!
//! 1. Unary calls run inline
//! 2. Client-streaming calls fold the request stream and reply once
//! 3. Server-streaming calls spawn a session bridging one registry
//!    subscription to the response stream
//! 4. Bidi calls spawn a session that drains requests and paces replies
//!
//! Generated code is checked in under `packages/schema-gen`.

pub mod server;

// Allow clippy warnings and missing docs in generated code
#[allow(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
pub mod proto {
    pub mod routing {
        pub mod v1 {
            include!("../../../../../packages/schema-gen/rust/routing/v1/routing.v1.rs");
        }
    }
}

pub use server::{RoutingServer, RoutingServerConfig, SessionCounters, serve};
