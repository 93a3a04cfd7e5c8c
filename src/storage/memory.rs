use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

use super::{KeyValueStorage, StorageError};

/// In-memory key-value store.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// a component persisted. An optional quota (total bytes of keys and values)
/// makes writes fail the way a full browser store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<IndexMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once `limit` bytes are used
    pub fn with_quota(limit: usize) -> Self {
        Self {
            items: Rc::default(),
            quota: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().shift_remove(key);
        Ok(())
    }
}
