//! Key-value persistence for client state.
//!
//! Defines the string-in, string-out storage interface used for the favorites
//! list, with an in-memory and a file-backed implementation. Serialization is
//! the caller's concern; stores only move opaque strings.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Synchronous key-value storage.
///
/// Mirrors browser local storage: values are whole strings, every `set`
/// overwrites the previous value, and there are no transactions.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Reads the value stored under `key`, or `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// - `StorageError::Io` - If the backing medium could not be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - `StorageError::InvalidKey` - If the key cannot be mapped to the backing medium
    /// - `StorageError::Io` - If the backing medium could not be written
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Errors raised by key-value storage and favorites persistence.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Key contains characters that cannot be stored
    #[error("Invalid storage key '{key}'")]
    InvalidKey {
        /// The rejected key
        key: String,
    },

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {reason}")]
    Serialization {
        /// Description of the encoding failure
        reason: String,
    },

    /// Standard I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
