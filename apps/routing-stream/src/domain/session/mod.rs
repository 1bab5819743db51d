//! Session Values
//!
//! Values produced or consumed by the session handlers that are not metric
//! samples: the unary reply, the client-stream summary and the bidi plan.

use std::time::Duration;

/// Status string returned by every unary call.
pub const UNARY_STATUS: &str = "Server Hello";

// =============================================================================
// Unary
// =============================================================================

/// Reply to a unary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryReply {
    /// Status text sent back to the caller.
    pub status: String,
}

impl Default for UnaryReply {
    fn default() -> Self {
        Self {
            status: UNARY_STATUS.to_string(),
        }
    }
}

// =============================================================================
// Client Streaming
// =============================================================================

/// Fold of every request received on a client stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientStreamSummary {
    /// Number of requests received before end-of-input.
    pub received: u32,
    /// Distinct sources in first-seen order.
    pub sources: Vec<String>,
}

impl ClientStreamSummary {
    /// Fold one received source into the summary.
    pub fn record(&mut self, source: String) {
        self.received = self.received.saturating_add(1);
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }
}

// =============================================================================
// Bidirectional Streaming
// =============================================================================

/// What the outbound half of a bidi session sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiPlan {
    /// Number of replies to send.
    pub responses: u32,
    /// Delay after each reply.
    pub pacing: Duration,
}

impl Default for BidiPlan {
    fn default() -> Self {
        Self {
            responses: 3,
            pacing: Duration::from_millis(100),
        }
    }
}

/// One outbound message on a bidi session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiReply {
    /// Zero-based position in the outbound sequence.
    pub sequence: u32,
}

/// Totals for a finished bidi session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BidiOutcome {
    /// Requests drained from the inbound direction.
    pub received: u32,
    /// Replies written to the outbound direction.
    pub sent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_reply_default_status() {
        assert_eq!(UnaryReply::default().status, "Server Hello");
    }

    #[test]
    fn summary_counts_every_request_and_dedups_sources() {
        let mut summary = ClientStreamSummary::default();
        for source in ["10.10.0.1", "10.10.0.2", "10.10.0.1", "10.10.0.3"] {
            summary.record(source.to_string());
        }

        assert_eq!(summary.received, 4);
        assert_eq!(summary.sources, vec!["10.10.0.1", "10.10.0.2", "10.10.0.3"]);
    }

    #[test]
    fn bidi_plan_defaults() {
        let plan = BidiPlan::default();
        assert_eq!(plan.responses, 3);
        assert_eq!(plan.pacing, Duration::from_millis(100));
    }
}
