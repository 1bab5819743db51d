//! Subscription Types
//!
//! Identity of a subscriber and the tallies produced when a sample is
//! fanned out across the registry.

use std::fmt;

// =============================================================================
// Subscriber Id
// =============================================================================

/// Caller-supplied subscriber identifier.
///
/// Uniqueness is not enforced: the most recent registration under an id wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Create a subscriber id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SubscriberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// Broadcast Outcome
// =============================================================================

/// Result of fanning one event out to every registered queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Queues that accepted the event.
    pub delivered: usize,
    /// Queues that were full; the event was dropped for them.
    pub dropped_full: usize,
    /// Queues whose receiving end is already gone.
    pub disconnected: usize,
}

impl BroadcastOutcome {
    /// Number of queues the broadcast visited.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.delivered + self.dropped_full + self.disconnected
    }
}

// =============================================================================
// Registry Statistics
// =============================================================================

/// Cumulative registry statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Currently registered subscribers.
    pub subscribers: usize,
    /// Broadcasts performed since creation.
    pub samples_broadcast: u64,
    /// Events accepted by subscriber queues.
    pub deliveries: u64,
    /// Events dropped because a queue was full.
    pub drops: u64,
}
