//! Subscription Registry
//!
//! Fans listener events out to one bounded queue per subscriber.
//!
//! # Architecture
//!
//! The registry owns a map from [`SubscriberId`] to the sending half of a
//! tokio mpsc queue. Sessions hold the receiving half inside a
//! [`Subscription`], which removes its own entry when dropped.
//!
//! - The map is guarded by a single `parking_lot::Mutex`. Register,
//!   unregister and the broadcast iteration are serialized on it.
//! - Broadcast only calls `try_send` while holding the lock, so it never
//!   waits on a slow subscriber and never suspends with the lock held.
//! - A full queue drops the event for that subscriber only.
//! - Payloads travel through the per-subscriber queues, so consumers never
//!   contend on the lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::metric::ListenerEvent;
use crate::domain::subscription::{BroadcastOutcome, RegistryStats, SubscriberId};
use crate::infrastructure::metrics;

/// Shared registry reference.
pub type SharedRegistry = Arc<SubscriptionRegistry>;

// =============================================================================
// Registry State
// =============================================================================

#[derive(Debug)]
struct Entry {
    generation: u64,
    tx: mpsc::Sender<ListenerEvent>,
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: HashMap<SubscriberId, Entry>,
    next_generation: u64,
}

// =============================================================================
// Subscription Registry
// =============================================================================

/// Map of live subscribers and their outbound queues.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use routing_stream::{ListenerEvent, MetricSample, SubscriptionRegistry};
///
/// # tokio_test::block_on(async {
/// let registry = Arc::new(SubscriptionRegistry::new());
/// let mut subscription = registry.register("1".into(), 100);
///
/// let outcome = registry.broadcast(&MetricSample::new("1.1.1.1", "2.2.2.2", [42, 0, 0]).into());
/// assert_eq!(outcome.delivered, 1);
///
/// let ListenerEvent::Metric(sample) = subscription.recv().await.unwrap();
/// assert_eq!(sample.metric1(), 42);
///
/// drop(subscription);
/// assert!(registry.is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    state: Mutex<RegistryState>,
    samples_broadcast: AtomicU64,
    deliveries: AtomicU64,
    drops: AtomicU64,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a queue of `capacity` events under `id`.
    ///
    /// Any previous entry under the same id is replaced; its subscription
    /// sees end-of-stream once its buffered events are drained. A capacity
    /// of zero is treated as one.
    #[must_use]
    pub fn register(self: &Arc<Self>, id: SubscriberId, capacity: usize) -> Subscription {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        let (generation, replaced, subscribers) = {
            let mut state = self.state.lock();
            let generation = state.next_generation;
            state.next_generation += 1;
            let replaced = state
                .entries
                .insert(id.clone(), Entry { generation, tx })
                .is_some();
            (generation, replaced, state.entries.len())
        };

        metrics::set_subscribers(subscribers);
        if replaced {
            tracing::warn!(subscriber_id = %id, "Subscriber id re-registered, previous queue replaced");
        } else {
            tracing::debug!(subscriber_id = %id, capacity, "Subscriber registered");
        }

        Subscription {
            id,
            generation,
            rx,
            registry: Arc::clone(self),
        }
    }

    /// Remove the entry for `id` if present.
    ///
    /// Idempotent: unregistering an unknown id does nothing.
    pub fn unregister(&self, id: &SubscriberId) {
        let (removed, subscribers) = {
            let mut state = self.state.lock();
            let removed = state.entries.remove(id).is_some();
            (removed, state.entries.len())
        };

        if removed {
            metrics::set_subscribers(subscribers);
            tracing::debug!(subscriber_id = %id, "Subscriber unregistered");
        }
    }

    /// Remove `id` only if it still belongs to `generation`.
    fn release(&self, id: &SubscriberId, generation: u64) {
        let (removed, subscribers) = {
            let mut state = self.state.lock();
            let current = state
                .entries
                .get(id)
                .is_some_and(|entry| entry.generation == generation);
            if current {
                state.entries.remove(id);
            }
            (current, state.entries.len())
        };

        if removed {
            metrics::set_subscribers(subscribers);
            tracing::debug!(subscriber_id = %id, "Subscription released");
        }
    }

    /// Deliver `event` to every registered queue without waiting.
    pub fn broadcast(&self, event: &ListenerEvent) -> BroadcastOutcome {
        let mut outcome = BroadcastOutcome::default();

        {
            let state = self.state.lock();
            for (id, entry) in &state.entries {
                match entry.tx.try_send(event.clone()) {
                    Ok(()) => outcome.delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        outcome.dropped_full += 1;
                        tracing::debug!(subscriber_id = %id, "Subscriber queue full, event dropped");
                    }
                    Err(TrySendError::Closed(_)) => outcome.disconnected += 1,
                }
            }
        }

        self.samples_broadcast.fetch_add(1, Ordering::Relaxed);
        self.deliveries
            .fetch_add(outcome.delivered as u64, Ordering::Relaxed);
        self.drops
            .fetch_add(outcome.dropped_full as u64, Ordering::Relaxed);
        metrics::record_broadcast(&outcome);

        outcome
    }

    /// Whether `id` currently has an entry.
    #[must_use]
    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.state.lock().entries.contains_key(id)
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether no subscriber is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cumulative statistics.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            subscribers: self.len(),
            samples_broadcast: self.samples_broadcast.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            drops: self.drops.load(Ordering::Relaxed),
        }
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Receiving end of one registry entry.
///
/// Dropping the subscription unregisters it, on every exit path of the
/// owning session.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    generation: u64,
    rx: mpsc::Receiver<ListenerEvent>,
    registry: SharedRegistry,
}

impl Subscription {
    /// Subscriber id this subscription was registered under.
    #[must_use]
    pub const fn id(&self) -> &SubscriberId {
        &self.id
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the entry has been replaced or unregistered and
    /// the queue is drained.
    pub async fn recv(&mut self) -> Option<ListenerEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<ListenerEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.release(&self.id, self.generation);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::domain::metric::MetricSample;

    fn event(n: i32) -> ListenerEvent {
        MetricSample::new("1.1.1.1", "2.2.2.2", [n, 0, 0]).into()
    }

    fn metric1(event: &ListenerEvent) -> i32 {
        let ListenerEvent::Metric(sample) = event;
        sample.metric1()
    }

    fn drain(subscription: &mut Subscription) -> Vec<i32> {
        std::iter::from_fn(|| subscription.try_recv())
            .map(|e| metric1(&e))
            .collect()
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = SubscriptionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.stats(), RegistryStats::default());
    }

    #[test]
    fn register_and_drop_round_trip() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let id = SubscriberId::from("1");

        let subscription = registry.register(id.clone(), 100);
        assert!(registry.contains(&id));
        assert_eq!(subscription.id(), &id);

        drop(subscription);
        assert!(!registry.contains(&id));
    }

    #[test]
    fn broadcast_reaches_every_subscriber_in_order() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut a = registry.register("a".into(), 10);
        let mut b = registry.register("b".into(), 10);

        for n in 1..=3 {
            let outcome = registry.broadcast(&event(n));
            assert_eq!(outcome.delivered, 2);
        }

        assert_eq!(drain(&mut a), vec![1, 2, 3]);
        assert_eq!(drain(&mut b), vec![1, 2, 3]);
        assert_eq!(registry.stats().deliveries, 6);
        assert_eq!(registry.stats().samples_broadcast, 3);
    }

    #[test]
    fn broadcast_with_no_subscribers_is_a_no_op() {
        let registry = SubscriptionRegistry::new();
        let outcome = registry.broadcast(&event(1));
        assert_eq!(outcome.total(), 0);
        assert_eq!(registry.stats().samples_broadcast, 1);
    }

    #[test]
    fn unregister_unknown_id_is_harmless() {
        let registry = SubscriptionRegistry::new();
        registry.unregister(&"missing".into());
        registry.unregister(&"missing".into());
        assert!(registry.is_empty());
    }

    #[test]
    fn full_queue_drops_only_for_that_subscriber() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut slow = registry.register("slow".into(), 1);
        let mut fast = registry.register("fast".into(), 10);

        let first = registry.broadcast(&event(1));
        let second = registry.broadcast(&event(2));

        assert_eq!(first.delivered, 2);
        assert_eq!(second.delivered, 1);
        assert_eq!(second.dropped_full, 1);
        assert_eq!(drain(&mut slow), vec![1]);
        assert_eq!(drain(&mut fast), vec![1, 2]);
        assert_eq!(registry.stats().drops, 1);
    }

    #[tokio::test]
    async fn re_registration_replaces_previous_queue() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut first = registry.register("1".into(), 10);
        let _ = registry.broadcast(&event(1));

        let mut second = registry.register("1".into(), 10);
        let _ = registry.broadcast(&event(2));

        assert_eq!(registry.len(), 1);
        assert_eq!(first.recv().await.map(|e| metric1(&e)), Some(1));
        assert!(first.recv().await.is_none(), "replaced queue must end");
        assert_eq!(drain(&mut second), vec![2]);
    }

    #[test]
    fn dropping_replaced_subscription_keeps_newer_entry() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let first = registry.register("1".into(), 10);
        let _second = registry.register("1".into(), 10);

        drop(first);
        assert!(registry.contains(&"1".into()));
    }

    #[test]
    fn unregister_while_subscription_alive() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut subscription = registry.register("1".into(), 10);

        registry.unregister(&"1".into());
        let outcome = registry.broadcast(&event(1));

        assert_eq!(outcome.total(), 0);
        assert!(drain(&mut subscription).is_empty());
        drop(subscription);
        assert!(registry.is_empty());
    }

    #[test]
    fn dropped_receiver_counts_as_disconnected() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        registry.state.lock().entries.insert(
            "ghost".into(),
            Entry {
                generation: u64::MAX,
                tx,
            },
        );

        let outcome = registry.broadcast(&event(1));
        assert_eq!(outcome.disconnected, 1);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let mut subscription = registry.register("1".into(), 0);
        assert_eq!(registry.broadcast(&event(5)).delivered, 1);
        assert_eq!(drain(&mut subscription), vec![5]);
    }

    #[test]
    fn concurrent_register_unregister_and_broadcast() {
        let registry = Arc::new(SubscriptionRegistry::new());

        let broadcaster = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for n in 0..500 {
                    let _ = registry.broadcast(&event(n));
                }
            })
        };

        let churners: Vec<_> = (0..4)
            .map(|t| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for n in 0..100 {
                        let id = SubscriberId::from(format!("{t}-{}", n % 5));
                        let mut subscription = registry.register(id.clone(), 16);
                        let seen = drain(&mut subscription);
                        assert!(seen.windows(2).all(|w| w[0] < w[1]));
                        if n % 3 == 0 {
                            registry.unregister(&id);
                        }
                    }
                })
            })
            .collect();

        broadcaster.join().unwrap();
        for churner in churners {
            churner.join().unwrap();
        }
        assert!(registry.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Register(u8),
        Unregister(u8),
        Broadcast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..4).prop_map(Op::Register),
            (0u8..4).prop_map(Op::Unregister),
            Just(Op::Broadcast),
            Just(Op::Broadcast),
        ]
    }

    proptest! {
        #[test]
        fn subscribers_see_each_broadcast_at_most_once_in_order(
            ops in prop::collection::vec(op_strategy(), 1..64)
        ) {
            let registry = Arc::new(SubscriptionRegistry::new());
            // Live handle and what it should receive, keyed by id.
            let mut live: BTreeMap<u8, (Subscription, Vec<i32>)> = BTreeMap::new();
            let mut retired: Vec<(Subscription, Vec<i32>)> = Vec::new();
            let mut registered: BTreeMap<u8, bool> = BTreeMap::new();
            let mut counter = 0;

            for op in ops {
                match op {
                    Op::Register(id) => {
                        let subscription = registry.register(id.to_string().into(), 1024);
                        if let Some(previous) = live.insert(id, (subscription, Vec::new())) {
                            retired.push(previous);
                        }
                        registered.insert(id, true);
                    }
                    Op::Unregister(id) => {
                        registry.unregister(&id.to_string().into());
                        registered.insert(id, false);
                    }
                    Op::Broadcast => {
                        counter += 1;
                        let _ = registry.broadcast(&event(counter));
                        for (id, (_, expected)) in &mut live {
                            if registered.get(id).copied().unwrap_or(false) {
                                expected.push(counter);
                            }
                        }
                    }
                }
            }

            for (mut subscription, expected) in live.into_values().chain(retired) {
                prop_assert_eq!(drain(&mut subscription), expected);
            }
            prop_assert!(registry.is_empty());
        }
    }
}
