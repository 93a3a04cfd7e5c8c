//! Durable key-value storage for user preferences.
//!
//! The game only persists small string records (see
//! [`AUDIO_PREFERENCES_KEY`](crate::models::AUDIO_PREFERENCES_KEY)). Two
//! backends implement [`KeyValueStorage`]:
//!
//! - [`FileStorage`]: a YAML mapping of keys to values in `<data_dir>/storage.yaml`
//! - [`MemoryStorage`]: process-local map with an optional byte quota, for tests
//!   and for running without a writable data directory
//!
//! Storage is best-effort. Callers such as
//! [`PreferenceStore`](crate::services::PreferenceStore) recover from every
//! [`StorageError`] with defaults instead of propagating it.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize stored data: {0}")]
    Serialization(String),

    #[error("Storage quota of {limit} bytes exceeded while writing '{key}'")]
    QuotaExceeded { key: String, limit: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value store scoped to one application.
///
/// Methods take `&self`; implementations use interior mutability since all
/// access happens on the single event-loop thread.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage {
    /// Read a value, `Ok(None)` when the key was never written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
