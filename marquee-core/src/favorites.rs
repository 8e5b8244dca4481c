//! Persisted favorites list.
//!
//! The list is held in memory in insertion order and written back to storage
//! in full after every change.

use crate::record::MovieRecord;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// Favorited records backed by key-value storage.
///
/// Membership is keyed by record id; no two stored records share an id.
#[derive(Debug)]
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    key: String,
    records: Vec<MovieRecord>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads favorites from `storage` under the default key.
    ///
    /// Never fails: a missing key, unreadable storage or malformed content
    /// all produce an empty list.
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, FAVORITES_KEY)
    }

    /// Loads favorites stored under a custom key.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let records = match storage.get(&key) {
            Ok(Some(raw)) => decode_records(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites from storage: {e}");
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} favorites", records.len());

        Self {
            storage,
            key,
            records,
        }
    }

    /// Adds `record` if no favorite has its id, otherwise removes that
    /// favorite, then persists the full list.
    ///
    /// Returns whether the record is a favorite after the call. The in-memory
    /// change is kept even when persisting fails.
    ///
    /// # Errors
    ///
    /// - `StorageError::Serialization` - If the list could not be encoded
    /// - `StorageError::Io` - If the storage write failed
    pub fn toggle(&mut self, record: &MovieRecord) -> Result<bool, StorageError> {
        let now_favorite = match self.position(&record.id) {
            Some(index) => {
                self.records.remove(index);
                false
            }
            None => {
                self.records.push(record.clone());
                true
            }
        };

        self.persist()?;
        Ok(now_favorite)
    }

    /// Serializes the whole list to storage, overwriting previous content.
    ///
    /// # Errors
    ///
    /// - `StorageError::Serialization` - If the list could not be encoded
    /// - `StorageError::Io` - If the storage write failed
    pub fn persist(&self) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(&self.records).map_err(|e| StorageError::Serialization {
                reason: e.to_string(),
            })?;
        self.storage.set(&self.key, &encoded)
    }

    /// Checks whether a record with `id` is a favorite.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Favorite with the given id, if any.
    pub fn get(&self, id: &str) -> Option<&MovieRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Favorites in insertion order.
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when there are no favorites.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

/// Decodes a stored list, dropping later duplicates of an id.
fn decode_records(raw: &str) -> Vec<MovieRecord> {
    let decoded: Vec<MovieRecord> = match serde_json::from_str::<Option<Vec<MovieRecord>>>(raw) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Ignoring malformed favorites data: {e}");
            return Vec::new();
        }
    };

    let mut unique: Vec<MovieRecord> = Vec::with_capacity(decoded.len());
    for record in decoded {
        if !unique.iter().any(|existing| existing.id == record.id) {
            unique.push(record);
        }
    }
    unique
}
