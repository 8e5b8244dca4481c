//! File-backed key-value store.
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes go to a temporary sibling
//! file that is renamed over the target, so readers never see a partial value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Key-value store persisting one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
    temp_file_suffix: String,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`. The directory is created lazily
    /// on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            temp_file_suffix: ".tmp".to_string(),
        }
    }

    /// Overrides the suffix used for in-progress writes.
    pub fn with_temp_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.temp_file_suffix = suffix.into();
        self
    }

    /// Directory holding the stored values.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.data_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.data_dir)?;

        let mut temp_path = path.clone().into_os_string();
        temp_path.push(&self.temp_file_suffix);
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
