// ABOUTME: SyncPlay settings accessor over a key-value store
// ABOUTME: Namespaced keys, typed getters with defaults, and change notification on write

use std::sync::Arc;
use syncplay_storage::{KeyValueStore, StorageResult};
use tracing::debug;

use crate::events::{ChangeListeners, SubscriptionHandle};
use crate::parse::{parse_bool, parse_float_prefix};
use crate::types::SettingChange;

/// Prefix of every stored settings key
pub const SETTINGS_PREFIX: &str = "syncPlay";

/// Storage key for the setting `name` (`syncPlay-<name>`)
pub fn key_for(name: &str) -> String {
    format!("{}-{}", SETTINGS_PREFIX, name)
}

/// Settings accessor for the SyncPlay client.
///
/// Construct one at startup and hand it to whatever needs settings. It keeps
/// no values of its own; every read goes to the underlying store. Storage
/// errors are returned as-is.
#[derive(Clone)]
pub struct SettingsStore {
    storage: Arc<dyn KeyValueStore>,
    listeners: ChangeListeners,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            listeners: ChangeListeners::new(),
        }
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    pub fn key_for(&self, name: &str) -> String {
        key_for(name)
    }

    /// Raw stored value, `None` if the setting was never written
    pub fn get(&self, name: &str) -> StorageResult<Option<String>> {
        self.storage.get_item(&key_for(name))
    }

    /// Writes a setting and notifies listeners if the stored value changed.
    ///
    /// The value is read back after writing, so listeners see what the store
    /// actually kept.
    pub fn set(&self, name: &str, value: &str) -> StorageResult<()> {
        let old_value = self.get(name)?;
        self.storage.set_item(&key_for(name), value)?;
        let new_value = self.get(name)?;

        if new_value != old_value {
            self.listeners.notify(&SettingChange {
                name: name.to_string(),
                new_value: new_value.clone(),
                old_value: old_value.clone(),
            });
        }

        debug!(
            "SyncPlay settings set: '{}' from '{}' to '{}'",
            name,
            old_value.as_deref().unwrap_or("null"),
            new_value.as_deref().unwrap_or("null")
        );

        Ok(())
    }

    /// `"true"` and `"false"` map to their booleans; anything else, including
    /// a missing value, yields `default_value`.
    pub fn get_bool(&self, name: &str, default_value: bool) -> StorageResult<bool> {
        let value = self.get(name)?;
        Ok(value.as_deref().and_then(parse_bool).unwrap_or(default_value))
    }

    pub fn get_bool_or_false(&self, name: &str) -> StorageResult<bool> {
        self.get_bool(name, false)
    }

    /// Parses the leading number of the stored value, so `"3.5abc"` reads as
    /// 3.5. Missing, empty, or non-numeric values yield `default_value`.
    pub fn get_float(&self, name: &str, default_value: f64) -> StorageResult<f64> {
        let value = self.get(name)?;
        Ok(match value.as_deref() {
            None | Some("") => default_value,
            Some(raw) => parse_float_prefix(raw).unwrap_or(default_value),
        })
    }

    pub fn get_float_or_zero(&self, name: &str) -> StorageResult<f64> {
        self.get_float(name, 0.0)
    }

    /// Calls `listener` whenever the stored value of `name` changes
    pub fn subscribe<F>(&self, name: &str, listener: F) -> SubscriptionHandle
    where
        F: Fn(&SettingChange) + Send + Sync + 'static,
    {
        self.listeners.subscribe(name, listener)
    }

    /// Calls `listener` whenever any setting changes
    pub fn subscribe_all<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&SettingChange) + Send + Sync + 'static,
    {
        self.listeners.subscribe_all(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use syncplay_storage::MemoryStore;

    fn memory_settings() -> SettingsStore {
        SettingsStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_key_for_prefixes_name() {
        assert_eq!(key_for("enabled"), "syncPlay-enabled");
        assert_eq!(key_for(""), "syncPlay-");
        assert_eq!(
            memory_settings().key_for("enableSyncPlayButton"),
            "syncPlay-enableSyncPlayButton"
        );
    }

    #[test]
    fn test_set_writes_namespaced_key() {
        let storage = Arc::new(MemoryStore::new());
        let settings = SettingsStore::new(storage.clone());

        settings.set("enabled", "true").unwrap();

        assert_eq!(
            storage.get_item("syncPlay-enabled").unwrap(),
            Some("true".to_string())
        );
        assert_eq!(storage.get_item("enabled").unwrap(), None);
    }

    #[test]
    fn test_get_missing_is_none() {
        assert_eq!(memory_settings().get("missing").unwrap(), None);
    }

    #[test]
    fn test_unchanged_value_does_not_notify() {
        let settings = memory_settings();
        let count = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&count);
        let _handle = settings.subscribe("speed", move |_| *counter.lock().unwrap() += 1);

        settings.set("speed", "1").unwrap();
        settings.set("speed", "1").unwrap();
        settings.set("speed", "2").unwrap();

        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn test_clones_share_listeners() {
        let settings = memory_settings();
        let clone = settings.clone();
        let _handle = settings.subscribe_all(|_| {});

        assert_eq!(clone.listener_count(), 1);
    }
}
