//! Domain Layer - Core types for metric distribution.
//!
//! This layer contains the value types that flow through the hub and the
//! session handlers. Nothing here performs I/O or owns a task.

/// Metric samples and the listener event sum type.
pub mod metric;

/// Subscriber identity and broadcast statistics.
pub mod subscription;

/// Session-level values (summaries, plans, outcomes).
pub mod session;
