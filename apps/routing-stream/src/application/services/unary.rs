//! Unary Session Handler
//!
//! Answers a single request immediately. Keeps no state between calls.

use crate::domain::session::UnaryReply;

/// Handle one unary request.
#[must_use]
pub fn handle(message: &str) -> UnaryReply {
    tracing::info!(message, "Unary request received");
    UnaryReply::default()
}
