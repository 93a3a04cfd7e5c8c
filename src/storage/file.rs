use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fs;

use super::{KeyValueStorage, StorageError};

/// File name of the store inside the data directory
pub const STORAGE_FILE_NAME: &str = "storage.yaml";

/// Key-value store persisted as a YAML mapping.
///
/// The whole mapping is cached in memory and rewritten on every mutation.
/// A missing file is an empty store; a malformed file is logged and treated
/// as empty, and gets replaced on the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: Utf8PathBuf,
    items: RefCell<IndexMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) the store in `data_dir`.
    ///
    /// # Errors
    /// Fails only if the data directory cannot be created or the existing
    /// file cannot be read.
    pub fn open<P: AsRef<Utf8Path>>(data_dir: P) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
        }

        let path = data_dir.join(STORAGE_FILE_NAME);
        let items = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match serde_yaml_ng::from_str::<Option<IndexMap<String, String>>>(&contents) {
                Ok(items) => items.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!("Storage file {} is malformed, starting empty: {}", path, e);
                    IndexMap::new()
                }
            }
        } else {
            IndexMap::new()
        };

        tracing::debug!("Opened storage at {} ({} keys)", path, items.len());

        Ok(Self {
            path,
            items: RefCell::new(items),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn flush(&self, items: &IndexMap<String, String>) -> Result<(), StorageError> {
        let yaml = serde_yaml_ng::to_string(items)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.borrow_mut();
        let previous = items.insert(key.to_string(), value.to_string());

        if let Err(e) = self.flush(&items) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => items.insert(key.to_string(), old),
                None => items.shift_remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.borrow_mut();
        if items.shift_remove(key).is_some() {
            self.flush(&items)?;
        }
        Ok(())
    }
}
