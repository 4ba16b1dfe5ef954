//! Reactive key/value store for UI bindings.
//!
//! State is an immutable JSON object swapped atomically on every publish.
//! Observers register per key and are called with that key's value after
//! each publish. Observers may belong to a [`SubscriberScope`] so one owner
//! can drop its own observers without touching anyone else's.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::observability::metrics;
use crate::store::actions::MapAction;

/// Store contents.
pub type StoreState = Map<String, Value>;

type Callback = Arc<dyn Fn(Option<&Value>) + Send + Sync>;

/// Handle returned by [`ReactiveStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Owner tag for a group of subscriptions, unique per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberScope(u64);

impl SubscriberScope {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

struct Subscriber {
    key: String,
    scope: Option<SubscriberScope>,
    callback: Callback,
}

pub struct ReactiveStore {
    state: ArcSwap<StoreState>,
    map_actions: DashMap<String, MapAction>,
    subscribers: DashMap<SubscriptionId, Subscriber>,
    next_id: AtomicU64,
}

impl ReactiveStore {
    pub fn new(initial: StoreState) -> Self {
        Self {
            state: ArcSwap::from_pointee(initial),
            map_actions: DashMap::new(),
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Builder form of [`register_action`](Self::register_action).
    pub fn with_action(self, name: impl Into<String>, action: MapAction) -> Self {
        self.register_action(name, action);
        self
    }

    pub fn register_action(&self, name: impl Into<String>, action: MapAction) {
        self.map_actions.insert(name.into(), action);
    }

    pub fn map_action(&self, name: &str) -> Option<MapAction> {
        self.map_actions.get(name).map(|r| r.value().clone())
    }

    /// Current state snapshot.
    pub fn state(&self) -> Arc<StoreState> {
        self.state.load_full()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.state.load().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.state.load().contains_key(key)
    }

    /// Observe `key`. Returns `None` unless the key already exists in state.
    pub fn subscribe<F>(&self, key: &str, callback: F) -> Option<SubscriptionId>
    where
        F: Fn(Option<&Value>) + Send + Sync + 'static,
    {
        self.insert_subscriber(None, key, Arc::new(callback))
    }

    /// Like [`subscribe`](Self::subscribe), owned by `scope`.
    pub fn subscribe_scoped<F>(
        &self,
        scope: SubscriberScope,
        key: &str,
        callback: F,
    ) -> Option<SubscriptionId>
    where
        F: Fn(Option<&Value>) + Send + Sync + 'static,
    {
        self.insert_subscriber(Some(scope), key, Arc::new(callback))
    }

    fn insert_subscriber(
        &self,
        scope: Option<SubscriberScope>,
        key: &str,
        callback: Callback,
    ) -> Option<SubscriptionId> {
        if !self.contains_key(key) {
            tracing::debug!(key, "Refusing subscription to unknown store key");
            return None;
        }

        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.insert(
            id,
            Subscriber {
                key: key.to_string(),
                scope,
                callback,
            },
        );
        Some(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop the observers owned by `scope`; returns how many were removed.
    pub fn reset_scope(&self, scope: SubscriberScope) -> usize {
        let before = self.subscribers.len();
        self.subscribers.retain(|_, s| s.scope != Some(scope));
        before.saturating_sub(self.subscribers.len())
    }

    /// Replace the state and notify observers once.
    pub fn publish(&self, state: StoreState) {
        let state = Arc::new(state);
        self.state.store(state.clone());
        self.notify(&state);
    }

    /// Atomically set `key` to `value` on top of the current state, then
    /// notify observers with the state that was stored.
    pub fn merge(&self, key: &str, value: Value) -> Arc<StoreState> {
        let mut stored = Arc::default();
        self.state.rcu(|current| {
            let mut next = StoreState::clone(current);
            next.insert(key.to_string(), value.clone());
            stored = Arc::new(next);
            Arc::clone(&stored)
        });
        self.notify(&stored);
        stored
    }

    fn notify(&self, state: &StoreState) {
        metrics::record_store_update();

        // Collect first so callbacks may (un)subscribe without deadlocking.
        let observers: Vec<(String, Callback)> = self
            .subscribers
            .iter()
            .map(|r| (r.value().key.clone(), r.value().callback.clone()))
            .collect();

        for (key, callback) in observers {
            callback(state.get(&key));
        }
    }
}

impl Default for ReactiveStore {
    fn default() -> Self {
        Self::new(StoreState::new())
    }
}

impl fmt::Debug for ReactiveStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveStore")
            .field("keys", &self.state.load().keys().collect::<Vec<_>>())
            .field("map_actions", &self.map_actions.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn store_with(state: Value) -> ReactiveStore {
        match state {
            Value::Object(map) => ReactiveStore::new(map),
            _ => panic!("state must be an object"),
        }
    }

    #[test]
    fn test_subscribe_requires_existing_key() {
        let store = store_with(json!({ "balance": "0" }));
        assert!(store.subscribe("missing", |_| {}).is_none());
        assert!(store.subscribe("balance", |_| {}).is_some());
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_merge_notifies_with_key_value() {
        let store = store_with(json!({ "balance": "0", "name": "VTHO" }));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store
            .subscribe("balance", move |v| sink.lock().unwrap().push(v.cloned()))
            .unwrap();

        let state = store.merge("balance", json!("100"));

        assert_eq!(state.get("balance"), Some(&json!("100")));
        assert_eq!(state.get("name"), Some(&json!("VTHO")));
        assert_eq!(*seen.lock().unwrap(), vec![Some(json!("100"))]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = store_with(json!({ "balance": "0" }));
        let count = Arc::new(AtomicU64::new(0));
        let c = count.clone();
        let id = store
            .subscribe("balance", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        store.merge("balance", json!("1"));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.merge("balance", json!("2"));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_merges_keep_every_key() {
        let store = ReactiveStore::default();
        std::thread::scope(|s| {
            for t in 0..8 {
                let store = &store;
                s.spawn(move || {
                    for i in 0..50 {
                        store.merge(&format!("k{t}_{i}"), json!(i));
                    }
                });
            }
        });
        assert_eq!(store.state().len(), 400);
        assert_eq!(store.get("k7_49"), Some(json!(49)));
    }

    #[test]
    fn test_reset_scope_keeps_other_owners() {
        let store = store_with(json!({ "balance": "0" }));
        let (a, b) = (SubscriberScope::next(), SubscriberScope::next());
        assert_ne!(a, b);

        let hits = Arc::new(AtomicU64::new(0));
        let h = hits.clone();
        store
            .subscribe_scoped(a, "balance", move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        store.subscribe_scoped(b, "balance", |_| {}).unwrap();
        store.subscribe("balance", |_| {}).unwrap();

        assert_eq!(store.reset_scope(b), 1);
        assert_eq!(store.subscriber_count(), 2);

        store.merge("balance", json!("5"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_publish_replaces_state() {
        let store = store_with(json!({ "a": 1, "b": 2 }));
        let mut next = StoreState::new();
        next.insert("a".into(), json!(3));
        store.publish(next);
        assert_eq!(store.get("a"), Some(json!(3)));
        assert!(!store.contains_key("b"));
    }
}
