//! Local key/value storage.
//!
//! Each key is one file under the data directory. Values are written whole,
//! there is no partial update.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{GridcalError, GridcalResult};

#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        KeyValueStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> GridcalResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(GridcalError::Validation(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(key))
    }

    /// Raw string value, `None` when the key was never written.
    pub fn get(&self, key: &str) -> GridcalResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    pub fn set(&self, key: &str, value: &str) -> GridcalResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write to a sibling file first so a crash never leaves half a value
        let tmp = self.dir.join(format!(".{}.tmp", key));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;

        log::debug!("wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    pub fn remove(&self, key: &str) -> GridcalResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> GridcalResult<Option<T>> {
        match self.get(key)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> GridcalResult<()> {
        let content = serde_json::to_string_pretty(value)?;
        self.set(key, &content)
    }
}
