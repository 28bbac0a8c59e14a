//! Key-Value Storage
//!
//! The shop persists its collections through a small string-keyed capability
//! so the same accessor logic runs against memory, a directory on disk, or
//! any other backend that can get, set and remove a string by key.

pub mod file;
pub mod memory;

use crate::error::StorageError;
use std::fmt::Debug;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A string-keyed, string-valued store.
///
/// All methods take `&self`; implementations use interior mutability.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Returns the value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
