//! Typed slot access over a [`StorageBackend`]
//!
//! Reads never fail: missing or malformed slots fall back to the caller's
//! default. Writes never fail either: a backend error is logged, the value is
//! kept in a session overlay so later reads still observe it, and the store
//! is flagged as degraded for the rest of the session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::file_storage::StorageBackend;
use super::memory::MemoryBackend;

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

struct Slots {
    backend: Box<dyn StorageBackend>,
    /// Values accepted this session whose durable write failed
    overlay: HashMap<String, String>,
    degraded: bool,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Shared handle to the persisted key-value slots of one session.
///
/// Cloning is cheap; all clones see the same slots and listeners.
#[derive(Clone)]
pub struct KvStore {
    slots: Arc<Mutex<Slots>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl KvStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                backend: Box::new(backend),
                overlay: HashMap::new(),
                degraded: false,
            })),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// A store that keeps everything in memory for this process only
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read a slot, returning `default` if it is absent or unparseable
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = {
            let slots = self.slots();
            match slots.overlay.get(key) {
                Some(value) => Some(value.clone()),
                None => match slots.backend.load(key) {
                    Ok(value) => value,
                    Err(e) => {
                        log::warn!("Failed to read slot {}: {}", key, e);
                        None
                    }
                },
            }
        };

        let Some(raw) = raw else {
            return default;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring malformed data in slot {}: {}", key, e);
                default
            }
        }
    }

    /// Persist a value. Returns whether the write reached durable storage.
    ///
    /// On a serialization failure nothing changes. On a backend failure the
    /// value still becomes visible to this session.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let mut batch = self.batch();
        batch.put(key, value);
        batch.commit()
    }

    /// Delete a slot so the next read yields the default
    pub fn remove(&self, key: &str) -> bool {
        let durable = {
            let mut slots = self.slots();
            slots.overlay.remove(key);
            match slots.backend.remove(key) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Failed to remove slot {}: {}", key, e);
                    // Shadow the stale durable value with an explicit null
                    slots.overlay.insert(key.to_string(), "null".to_string());
                    slots.degraded = true;
                    false
                }
            }
        };
        self.notify(&[key.to_string()]);
        durable
    }

    /// Start a multi-slot write whose changes are announced together
    pub fn batch(&self) -> Batch<'_> {
        Batch {
            store: self,
            entries: Vec::new(),
            failed: false,
        }
    }

    /// Whether any write this session failed to reach durable storage
    pub fn is_degraded(&self) -> bool {
        self.slots().degraded
    }

    /// Register a listener called with the slot key after every change
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));

        Subscription {
            listeners: Arc::downgrade(&self.listeners),
            id,
        }
    }

    fn notify(&self, keys: &[String]) {
        // Snapshot so listeners may read or subscribe without deadlocking
        let listeners: Vec<Listener> = {
            let guard = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            guard.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for key in keys {
            for listener in &listeners {
                listener(key);
            }
        }
    }
}

/// Pending writes to several slots.
///
/// All values are serialized up front; if any fails to serialize nothing is
/// written. Listeners run only after every slot has been stored.
pub struct Batch<'a> {
    store: &'a KvStore,
    entries: Vec<(String, String)>,
    failed: bool,
}

impl Batch<'_> {
    /// Queue a value for `key`; a later put for the same key wins
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> &mut Self {
        match serde_json::to_string(value) {
            Ok(json) => self.entries.push((key.to_string(), json)),
            Err(e) => {
                log::warn!("Failed to serialize value for slot {}: {}", key, e);
                self.failed = true;
            }
        }
        self
    }

    /// Apply the batch. Returns whether every slot reached durable storage.
    pub fn commit(self) -> bool {
        if self.failed || self.entries.is_empty() {
            return !self.failed;
        }

        let mut durable = true;
        {
            let mut slots = self.store.slots();
            for (key, json) in &self.entries {
                match slots.backend.save(key, json) {
                    Ok(()) => {
                        slots.overlay.remove(key);
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to persist slot {}, keeping it for this session only: {}",
                            key,
                            e
                        );
                        slots.overlay.insert(key.clone(), json.clone());
                        slots.degraded = true;
                        durable = false;
                    }
                }
            }
        }

        let keys: Vec<String> = self.entries.into_iter().map(|(key, _)| key).collect();
        self.store.notify(&keys);
        durable
    }
}

/// Handle returned by [`KvStore::subscribe`]; the listener is detached on drop
#[must_use = "dropping the subscription detaches the listener immediately"]
pub struct Subscription {
    listeners: Weak<Mutex<Listeners>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut guard = listeners.lock().unwrap_or_else(PoisonError::into_inner);
            guard.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_returns_default() {
        let store = KvStore::in_memory();
        let value: Vec<String> = store.read("missing", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_read_malformed_returns_default() {
        let store = KvStore::new(MemoryBackend::new().with_slot("broken", "{not json"));
        let value: u32 = store.read("broken", 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_write_then_read() {
        let store = KvStore::in_memory();
        assert!(store.write("numbers", &vec![1, 2, 3]));
        let value: Vec<u32> = store.read("numbers", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_write_survives_reopen_on_disk() {
        let temp = TempDir::new().unwrap();

        let store = KvStore::new(FileBackend::new(temp.path().to_path_buf()));
        assert!(store.write("greeting", "hello"));

        let reopened = KvStore::new(FileBackend::new(temp.path().to_path_buf()));
        let value: String = reopened.read("greeting", String::new());
        assert_eq!(value, "hello");
    }

    #[test]
    fn test_failed_write_is_visible_for_session() {
        let store = KvStore::new(MemoryBackend::failing());

        assert!(!store.write("slot", &42u32));
        assert!(store.is_degraded());

        let value: u32 = store.read("slot", 0);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_remove_resets_to_default() {
        let store = KvStore::in_memory();
        store.write("slot", &5u32);
        assert!(store.remove("slot"));
        let value: u32 = store.read("slot", 1);
        assert_eq!(value, 1);
    }

    #[test]
    fn test_subscribers_notified_until_dropped() {
        let store = KvStore::in_memory();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let subscription = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.write("a", &1u32);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        subscription.unsubscribe();
        store.write("a", &2u32);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_discarded_subscription_detaches() {
        let store = KvStore::in_memory();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let _ = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.write("a", &1u32);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_batch_notifies_after_all_slots_written() {
        let store = KvStore::in_memory();
        store.write("first", &1u32);
        store.write("second", &1u32);

        let observer = store.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |key| {
            // Both slots must already hold the new values
            let first: u32 = observer.read("first", 0);
            let second: u32 = observer.read("second", 0);
            sink.lock().unwrap().push((key.to_string(), first, second));
        });

        let mut batch = store.batch();
        batch.put("first", &2u32).put("second", &2u32);
        assert!(batch.commit());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(_, first, second)| *first == 2 && *second == 2));
    }
}
