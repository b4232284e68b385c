mod file_storage;
mod kv_store;
mod memory;

pub use file_storage::{FileBackend, StorageBackend, StorageError};
pub use kv_store::{Batch, KvStore, Subscription};
pub use memory::MemoryBackend;

/// Slot holding the ordered mood history log
pub const MOOD_HISTORY_KEY: &str = "innerhue-mood-history";
/// Slot holding user-created mood definitions
pub const CUSTOM_MOODS_KEY: &str = "innerhue-custom-moods";
/// Slot holding the personalization settings aggregate
pub const PERSONALIZATION_KEY: &str = "innerhue-personalization";
/// Slot holding the intensity event log
pub const INTENSITY_HISTORY_KEY: &str = "innerhue-intensity-history";
