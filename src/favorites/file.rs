//! JSON file backend for the favorites set
//!
//! The file holds a bare JSON array of ids, e.g. `[1,25]`. Every operation
//! re-reads the file; writes go to a sibling temp file that is then renamed
//! over the original.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::FavoritesStore;
use crate::utils::error::StoreError;

/// Favorites persisted as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<u32>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&raw).map_err(StoreError::Corrupt)
    }

    fn write(&self, ids: &[u32]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_vec(ids).map_err(StoreError::Serialize)?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, body)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = ids.len(), "Favorites saved");
        Ok(())
    }
}

impl FavoritesStore for JsonFileStore {
    fn list(&self) -> Result<Vec<u32>, StoreError> {
        self.read()
    }

    fn add(&self, id: u32) -> Result<bool, StoreError> {
        let mut ids = self.read()?;
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        self.write(&ids)?;
        Ok(true)
    }

    fn remove(&self, id: u32) -> Result<bool, StoreError> {
        let mut ids = self.read()?;
        let before = ids.len();
        ids.retain(|&existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.write(&ids)?;
        Ok(true)
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Favorites cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
