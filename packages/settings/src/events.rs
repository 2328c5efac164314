// ABOUTME: Typed change notification for settings
// ABOUTME: Listener registry keyed by setting name, with drop-to-unsubscribe handles

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::types::SettingChange;

pub type Listener = Arc<dyn Fn(&SettingChange) + Send + Sync>;

struct Subscription {
    id: u64,
    /// `None` receives every change
    name: Option<String>,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl Registry {
    fn remove(&self, id: u64) {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscriptions.retain(|s| s.id != id);
    }

    fn contains(&self, id: u64) -> bool {
        self.subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|s| s.id == id)
    }
}

/// Listeners for setting changes.
///
/// Listeners run synchronously, in the order they were registered. The
/// registry lock is not held while they run, so a listener may read or
/// write settings and add or remove subscriptions.
#[derive(Clone, Default)]
pub struct ChangeListeners {
    registry: Arc<Registry>,
}

impl ChangeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for changes to the setting `name`
    pub fn subscribe<F>(&self, name: &str, listener: F) -> SubscriptionHandle
    where
        F: Fn(&SettingChange) + Send + Sync + 'static,
    {
        self.insert(Some(name.to_string()), Arc::new(listener))
    }

    /// Registers `listener` for changes to any setting
    pub fn subscribe_all<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&SettingChange) + Send + Sync + 'static,
    {
        self.insert(None, Arc::new(listener))
    }

    pub fn len(&self) -> usize {
        self.registry
            .subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `change` to every listener registered for its name or for all names.
    ///
    /// A listener removed by an earlier listener in the same dispatch is skipped.
    pub(crate) fn notify(&self, change: &SettingChange) {
        let targets: Vec<(u64, Listener)> = {
            let subscriptions = self
                .registry
                .subscriptions
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            subscriptions
                .iter()
                .filter(|s| s.name.as_deref().map_or(true, |n| n == change.name))
                .map(|s| (s.id, Arc::clone(&s.listener)))
                .collect()
        };

        for (id, listener) in targets {
            if self.registry.contains(id) {
                listener(change);
            }
        }
    }

    fn insert(&self, name: Option<String>, listener: Listener) -> SubscriptionHandle {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Subscription { id, name, listener });

        SubscriptionHandle {
            id,
            registry: Arc::downgrade(&self.registry),
            detached: false,
        }
    }
}

impl std::fmt::Debug for ChangeListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Keeps a listener registered. Dropping the handle unsubscribes it.
#[must_use = "dropping the handle immediately unsubscribes the listener"]
pub struct SubscriptionHandle {
    id: u64,
    registry: Weak<Registry>,
    detached: bool,
}

impl SubscriptionHandle {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Leaves the listener registered for as long as the store lives
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(name: &str) -> SettingChange {
        SettingChange {
            name: name.to_string(),
            new_value: Some("1".to_string()),
            old_value: None,
        }
    }

    #[test]
    fn test_listener_only_sees_its_setting() {
        let listeners = ChangeListeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let _handle = listeners.subscribe("a", move |c| sink.lock().unwrap().push(c.name.clone()));

        listeners.notify(&change("a"));
        listeners.notify(&change("b"));

        assert_eq!(*seen.lock().unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let listeners = ChangeListeners::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let o1 = Arc::clone(&order);
        let _h1 = listeners.subscribe("a", move |_| o1.lock().unwrap().push(1));
        let o2 = Arc::clone(&order);
        let _h2 = listeners.subscribe_all(move |_| o2.lock().unwrap().push(2));
        let o3 = Arc::clone(&order);
        let _h3 = listeners.subscribe("a", move |_| o3.lock().unwrap().push(3));

        listeners.notify(&change("a"));

        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listeners = ChangeListeners::new();
        let handle = listeners.subscribe("a", |_| panic!("should not be called"));
        assert_eq!(listeners.len(), 1);

        drop(handle);
        assert!(listeners.is_empty());
        listeners.notify(&change("a"));
    }

    #[test]
    fn test_detach_keeps_listener() {
        let listeners = ChangeListeners::new();
        listeners.subscribe_all(|_| {}).detach();
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_handle_outliving_registry_is_harmless() {
        let listeners = ChangeListeners::new();
        let handle = listeners.subscribe("a", |_| {});
        drop(listeners);
        handle.unsubscribe();
    }

    #[test]
    fn test_listener_can_subscribe_during_dispatch() {
        let listeners = ChangeListeners::new();
        let inner = listeners.clone();
        let handles = Arc::new(Mutex::new(Vec::new()));

        let stash = Arc::clone(&handles);
        let _handle = listeners.subscribe("a", move |_| {
            stash.lock().unwrap().push(inner.subscribe("b", |_| {}));
        });

        listeners.notify(&change("a"));
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn test_listener_removed_during_dispatch_is_skipped() {
        let listeners = ChangeListeners::new();
        let second: Arc<Mutex<Option<SubscriptionHandle>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(Mutex::new(0));

        let slot = Arc::clone(&second);
        let _first = listeners.subscribe("a", move |_| {
            slot.lock().unwrap().take();
        });
        let counter = Arc::clone(&calls);
        *second.lock().unwrap() =
            Some(listeners.subscribe("a", move |_| *counter.lock().unwrap() += 1));

        listeners.notify(&change("a"));

        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(listeners.len(), 1);
    }
}
