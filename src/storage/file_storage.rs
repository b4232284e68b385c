use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Raw slot access used by [`KvStore`](super::KvStore).
///
/// Backends deal in already-serialized JSON text; parsing and fallback to
/// defaults happen one level up.
pub trait StorageBackend: Send {
    /// Load the raw contents of a slot, `None` if it was never written
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Durably replace the contents of a slot
    fn save(&mut self, key: &str, contents: &str) -> Result<()>;

    /// Delete a slot; deleting a missing slot is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Stores each slot as `<key>.json` inside a data directory
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    /// Create a backend storing slots under `base_path`
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("innerhue"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        Ok(Some(content))
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        // Write to a sibling temp file first so a crash never leaves a half-written slot
        let path = self.slot_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
