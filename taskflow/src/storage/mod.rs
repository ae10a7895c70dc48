//! Durable key-value slots for the persisted task blob.
//!
//! Defines the [`KeyValueStorage`] trait the task store writes through,
//! plus two implementations:
//! - [`MemoryStorage`]: a `HashMap`, for tests and one-shot exports.
//! - [`FileStorage`]: one file per key inside a data directory.

pub mod file;
pub mod memory;

use std::path::PathBuf;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur while reading or writing a storage slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A read from the backing store failed.
    #[error("failed to read key {key:?}: {source}")]
    Read {
        /// Key that was being read.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A write to the backing store failed.
    #[error("failed to write key {key:?}: {source}")]
    Write {
        /// Key that was being written.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The storage directory could not be created.
    #[error("failed to create storage directory {path}: {source}")]
    CreateDir {
        /// Directory that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A synchronous string-valued key-value store.
///
/// Each call is complete when it returns; there is no batching.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if the key is unset.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the slot exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the value cannot be stored.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
