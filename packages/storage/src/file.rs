// ABOUTME: JSON file-backed key-value store
// ABOUTME: Keeps all entries in one pretty-printed JSON object, rewritten on every write

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

use crate::{KeyValueStore, StorageResult};

/// Persistent store backed by a single JSON file.
///
/// The file is read once at [`JsonFileStore::open`]. Reads are then served from
/// memory and each write rewrites the whole file before it becomes visible.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file yields an empty store; the
    /// file and its parent directories are created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        let items = if path.exists() {
            debug!("Loading settings file: {:?}", path);
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str::<BTreeMap<String, String>>(&content)?
            }
        } else {
            debug!("Settings file does not exist yet: {:?}", path);
            BTreeMap::new()
        };

        debug!("Loaded {} stored entries", items.len());
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating settings directory: {:?}", parent);
                fs::create_dir_all(parent)?;
            }
        }

        let json_content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, json_content)?;

        debug!("Wrote {} entries to {:?}", items.len(), self.path);
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let items = self
            .items
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self
            .items
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;

        *items = next;
        Ok(())
    }
}
