//! Application Layer - Ports and session handlers.
//!
//! This layer contains the four session handlers and the port interfaces
//! they are written against, so that they can be driven by the gRPC
//! transport or by in-memory streams in tests.

/// Port interfaces for the transport and the sample source.
pub mod ports;

/// Session handlers, one per RPC shape.
pub mod services;
