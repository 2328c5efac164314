// ABOUTME: Key-value persistence layer for SyncPlay settings
// ABOUTME: Storage trait plus in-memory and JSON file backends

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

pub use config::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// String key-value store that settings are persisted into.
///
/// Implementations own durability and any normalization of written values.
/// Callers read back after writing when they need the stored form.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}
