// ABOUTME: SyncPlay client settings
// ABOUTME: Namespaced string settings with typed getters and change listeners

pub mod events;
pub mod parse;
pub mod store;
pub mod types;

// Re-export main types
pub use events::{ChangeListeners, Listener, SubscriptionHandle};
pub use parse::{parse_bool, parse_float_prefix};
pub use store::{key_for, SettingsStore, SETTINGS_PREFIX};
pub use types::{names, SettingChange};

// Re-export the storage layer so callers need only this crate
pub use syncplay_storage::{
    JsonFileStore, KeyValueStore, MemoryStore, StorageBackend, StorageError, StorageResult,
};
