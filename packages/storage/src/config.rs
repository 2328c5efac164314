use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{JsonFileStore, KeyValueStore, MemoryStore, StorageResult};

/// Which key-value backend settings are persisted into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageBackend {
    Memory {
        #[serde(default)]
        quota_bytes: Option<usize>,
    },
    File {
        path: PathBuf,
    },
}

impl StorageBackend {
    /// Default location of the settings file (`<config dir>/syncplay/settings.json`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("syncplay")
            .join("settings.json")
    }

    /// Opens the configured backend
    pub fn open(&self) -> StorageResult<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match self {
            StorageBackend::Memory {
                quota_bytes: Some(limit),
            } => Arc::new(MemoryStore::with_quota(*limit)),
            StorageBackend::Memory { quota_bytes: None } => Arc::new(MemoryStore::new()),
            StorageBackend::File { path } => Arc::new(JsonFileStore::open(path.clone())?),
        };
        Ok(store)
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::File {
            path: Self::default_path(),
        }
    }
}
