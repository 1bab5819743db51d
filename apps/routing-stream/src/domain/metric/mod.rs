//! Metric Sample Types
//!
//! A metric sample is one observation between a source and a destination
//! carrying up to three integer metrics. Samples are immutable once built;
//! the generator creates them and every session consumes its own clone.

use chrono::{DateTime, Utc};

// =============================================================================
// Metric Sample
// =============================================================================

/// One observation from a source to a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    source: String,
    destination: String,
    metric1: i32,
    metric2: i32,
    metric3: i32,
    observed_at: DateTime<Utc>,
}

impl MetricSample {
    /// Create a sample observed now.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        metrics: [i32; 3],
    ) -> Self {
        Self::observed_at(source, destination, metrics, Utc::now())
    }

    /// Create a sample with an explicit observation time.
    #[must_use]
    pub fn observed_at(
        source: impl Into<String>,
        destination: impl Into<String>,
        [metric1, metric2, metric3]: [i32; 3],
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            metric1,
            metric2,
            metric3,
            observed_at,
        }
    }

    /// Source identifier.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Destination identifier.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// First metric.
    #[must_use]
    pub const fn metric1(&self) -> i32 {
        self.metric1
    }

    /// Second metric.
    #[must_use]
    pub const fn metric2(&self) -> i32 {
        self.metric2
    }

    /// Third metric.
    #[must_use]
    pub const fn metric3(&self) -> i32 {
        self.metric3
    }

    /// When the sample was taken.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

// =============================================================================
// Listener Event
// =============================================================================

/// Everything a subscriber queue can carry.
///
/// Closed over the payloads the registry distributes, so a session never
/// has to inspect an untyped value at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    /// A generated metric sample.
    Metric(MetricSample),
}

impl From<MetricSample> for ListenerEvent {
    fn from(sample: MetricSample) -> Self {
        Self::Metric(sample)
    }
}

// =============================================================================
// Tests
// =============================================================================
