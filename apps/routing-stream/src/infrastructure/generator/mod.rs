//! Sample Generator
//!
//! Periodic task that builds one metric sample per tick and broadcasts it
//! through the subscription registry. Stops when its cancellation token
//! fires.

use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::application::ports::SampleSource;
use crate::domain::metric::{ListenerEvent, MetricSample};
use crate::infrastructure::broadcast::SharedRegistry;
use crate::infrastructure::metrics;

/// Default tick interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(300);

/// Configuration for the sample generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Time between samples.
    pub interval: Duration,
    /// Source identifier stamped on generated samples.
    pub source: String,
    /// Destination identifier stamped on generated samples.
    pub destination: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            source: "1.1.1.1".to_string(),
            destination: "2.2.2.2".to_string(),
        }
    }
}

/// Sample source drawing `metric1` uniformly from `0..100`.
#[derive(Debug, Clone)]
pub struct RandomSampleSource {
    source: String,
    destination: String,
}

impl RandomSampleSource {
    /// Create a source for the given endpoints.
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Create a source from generator configuration.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.source.clone(), config.destination.clone())
    }
}

impl SampleSource for RandomSampleSource {
    fn next_sample(&mut self) -> MetricSample {
        let metric1 = rand::rng().random_range(0..100);
        MetricSample::new(self.source.clone(), self.destination.clone(), [metric1, 0, 0])
    }
}

/// Summary returned when the generator stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorReport {
    /// Number of samples broadcast.
    pub ticks: u64,
}

/// Periodic producer feeding the registry.
pub struct SampleGenerator<S> {
    interval: Duration,
    source: S,
    registry: SharedRegistry,
    cancel: CancellationToken,
}

impl<S> SampleGenerator<S>
where
    S: SampleSource + 'static,
{
    /// Create a new generator.
    #[must_use]
    pub const fn new(
        config: &GeneratorConfig,
        source: S,
        registry: SharedRegistry,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            interval: config.interval,
            source,
            registry,
            cancel,
        }
    }

    /// Spawn the generator on the current runtime.
    pub fn spawn(self) -> JoinHandle<GeneratorReport> {
        tokio::spawn(self.run())
    }

    /// Run until cancelled.
    pub async fn run(mut self) -> GeneratorReport {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut report = GeneratorReport::default();

        tracing::info!(interval_ms = self.interval.as_millis(), "Sample generator started");

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    tracing::info!(ticks = report.ticks, "Sample generator stopped");
                    break;
                }
                _ = interval.tick() => {
                    self.tick();
                    report.ticks += 1;
                }
            }
        }

        report
    }

    fn tick(&mut self) {
        let sample = self.source.next_sample();
        metrics::record_sample_generated();
        tracing::trace!(
            source = sample.source(),
            destination = sample.destination(),
            metric1 = sample.metric1(),
            "Sample generated"
        );

        let outcome = self.registry.broadcast(&ListenerEvent::Metric(sample));
        if outcome.dropped_full > 0 {
            tracing::debug!(
                delivered = outcome.delivered,
                dropped = outcome.dropped_full,
                "Sample dropped for slow subscribers"
            );
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::broadcast::SubscriptionRegistry;

    fn every(interval: Duration) -> GeneratorConfig {
        GeneratorConfig {
            interval,
            ..GeneratorConfig::default()
        }
    }

    fn counting_source() -> impl SampleSource + 'static {
        let mut n = 0;
        move || {
            n += 1;
            MetricSample::new("src", "dst", [n, 0, 0])
        }
    }

    #[test]
    fn default_config_values() {
        let config = GeneratorConfig::default();
        assert_eq!(config.interval, Duration::from_millis(300));
        assert_eq!(config.source, "1.1.1.1");
        assert_eq!(config.destination, "2.2.2.2");
    }

    #[test]
    fn random_source_stays_in_range() {
        let mut source = RandomSampleSource::from_config(&GeneratorConfig::default());
        for _ in 0..200 {
            let sample = source.next_sample();
            assert!((0..100).contains(&sample.metric1()));
            assert_eq!(sample.source(), "1.1.1.1");
            assert_eq!(sample.destination(), "2.2.2.2");
        }
    }

    #[tokio::test]
    async fn generator_feeds_registered_subscribers() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut subscription = registry.register("1".into(), 100);
        let cancel = CancellationToken::new();

        let handle = SampleGenerator::new(
            &every(Duration::from_millis(10)),
            counting_source(),
            Arc::clone(&registry),
            cancel.clone(),
        )
        .spawn();

        let mut seen = Vec::new();
        while seen.len() < 3 {
            let event = tokio::time::timeout(Duration::from_secs(1), subscription.recv())
                .await
                .expect("generator should tick")
                .expect("queue should stay open");
            let ListenerEvent::Metric(sample) = event;
            seen.push(sample.metric1());
        }
        assert_eq!(seen, vec![1, 2, 3]);

        cancel.cancel();
        let report = handle.await.unwrap();
        assert!(report.ticks >= 3);
    }

    #[tokio::test]
    async fn cancellation_stops_generator() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let cancel = CancellationToken::new();

        let handle = SampleGenerator::new(
            &every(Duration::from_secs(10)),
            counting_source(),
            Arc::clone(&registry),
            cancel.clone(),
        )
        .spawn();

        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_millis(100), handle).await;
        assert!(result.is_ok(), "generator should shut down on cancellation");
    }

    #[tokio::test]
    async fn no_ticks_after_cancellation() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let cancel = CancellationToken::new();

        let handle = SampleGenerator::new(
            &every(Duration::from_millis(5)),
            counting_source(),
            Arc::clone(&registry),
            cancel.clone(),
        )
        .spawn();

        tokio::time::sleep(Duration::from_millis(30)).await;
        cancel.cancel();
        let report = handle.await.unwrap();

        let broadcast_at_stop = registry.stats().samples_broadcast;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(registry.stats().samples_broadcast, broadcast_at_stop);
        assert_eq!(report.ticks, broadcast_at_stop);
    }
}
