//! Per-process change notifications, scoped by namespace.
//!
//! An explicit publish/subscribe component replacing ambient global
//! listener registries: consumers subscribe to a namespace and are invoked
//! whenever that namespace's content is republished. Subscriptions detach
//! on drop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    listeners: HashMap<String, Vec<(u64, Callback)>>,
}

/// Namespace-scoped publish/subscribe bus.
///
/// # Examples
///
/// ```
/// use pagedoc::ChangeBus;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let bus = ChangeBus::new();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let seen = hits.clone();
/// let sub = bus.subscribe("index", move || {
///     seen.fetch_add(1, Ordering::SeqCst);
/// });
/// bus.publish("index");
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// drop(sub);
/// bus.publish("index");
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct ChangeBus {
    registry: Arc<Mutex<Registry>>,
    next_id: AtomicU64,
}

impl ChangeBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a namespace.
    ///
    /// The callback stays live until the returned `Subscription` is dropped
    /// or explicitly unsubscribed.
    pub fn subscribe(
        &self,
        namespace: impl Into<String>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        let namespace = namespace.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut registry = lock(&self.registry);
        registry
            .listeners
            .entry(namespace.clone())
            .or_default()
            .push((id, Arc::new(callback)));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            namespace,
            id,
        }
    }

    /// Invoke every live callback registered for a namespace.
    ///
    /// Callbacks run outside the registry lock, so a callback may freely
    /// subscribe or publish.
    pub fn publish(&self, namespace: &str) {
        let callbacks: Vec<Callback> = {
            let registry = lock(&self.registry);
            registry
                .listeners
                .get(namespace)
                .map(|subs| subs.iter().map(|(_, cb)| cb.clone()).collect())
                .unwrap_or_default()
        };
        for callback in callbacks {
            callback();
        }
    }

    /// Number of live subscriptions for a namespace.
    pub fn listener_count(&self, namespace: &str) -> usize {
        lock(&self.registry)
            .listeners
            .get(namespace)
            .map_or(0, Vec::len)
    }
}

fn lock(registry: &Mutex<Registry>) -> std::sync::MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle for one registered callback; detaches on drop.
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    namespace: String,
    id: u64,
}

impl Subscription {
    /// Explicitly remove this subscription (same as dropping it).
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = lock(&registry);
            if let Some(subs) = registry.listeners.get_mut(&self.namespace) {
                subs.retain(|(id, _)| *id != self.id);
                if subs.is_empty() {
                    registry.listeners.remove(&self.namespace);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        (hits, move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_publish_reaches_namespace_subscribers() {
        let bus = ChangeBus::new();
        let (hits, cb) = counter();
        let _sub = bus.subscribe("index", cb);

        bus.publish("index");
        bus.publish("index");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_publish_is_namespace_scoped() {
        let bus = ChangeBus::new();
        let (hits, cb) = counter();
        let _sub = bus.subscribe("index", cb);

        bus.publish("about");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = ChangeBus::new();
        let (hits, cb) = counter();
        let sub = bus.subscribe("index", cb);
        assert_eq!(bus.listener_count("index"), 1);

        drop(sub);
        assert_eq!(bus.listener_count("index"), 0);
        bus.publish("index");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let bus = ChangeBus::new();
        let (_, cb) = counter();
        let sub = bus.subscribe("index", cb);
        sub.unsubscribe();
        assert_eq!(bus.listener_count("index"), 0);
    }

    #[test]
    fn test_multiple_subscribers() {
        let bus = ChangeBus::new();
        let (hits_a, cb_a) = counter();
        let (hits_b, cb_b) = counter();
        let _a = bus.subscribe("index", cb_a);
        let _b = bus.subscribe("index", cb_b);

        bus.publish("index");
        assert_eq!(hits_a.load(Ordering::SeqCst), 1);
        assert_eq!(hits_b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = ChangeBus::new();
        let (_, cb) = counter();
        let sub = bus.subscribe("index", cb);
        drop(bus);
        drop(sub);
    }
}
