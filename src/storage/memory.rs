use std::collections::HashMap;

use super::file_storage::{Result, StorageBackend, StorageError};

/// Volatile backend: nothing survives the process.
///
/// Also used to simulate a broken disk in tests via [`MemoryBackend::failing`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose writes always fail, as with a full or disabled store
    pub fn failing() -> Self {
        Self {
            slots: HashMap::new(),
            fail_writes: true,
        }
    }

    /// Pre-seed a slot with raw contents
    pub fn with_slot(mut self, key: &str, contents: &str) -> Self {
        self.slots.insert(key.to_string(), contents.to_string());
        self
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!(
                "quota exceeded writing {}",
                key
            )));
        }
        self.slots.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!(
                "cannot remove {}",
                key
            )));
        }
        self.slots.remove(key);
        Ok(())
    }
}
