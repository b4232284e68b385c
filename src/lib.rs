pub mod config;
pub mod error;
pub mod history;
pub mod moods;
pub mod personalization;
pub mod storage;

use config::AppConfig;
use history::{MoodEntry, MoodHistory};
use moods::MoodCatalog;
use personalization::PersonalizationStore;
use storage::{FileBackend, KvStore, MemoryBackend};

/// One session's stores, all sharing a single persistence adapter
pub struct InnerHue {
    pub config: AppConfig,
    pub store: KvStore,
    pub catalog: MoodCatalog,
    pub history: MoodHistory,
    pub personalization: PersonalizationStore,
}

impl InnerHue {
    /// Open the stores under `config.data_dir`.
    ///
    /// If the directory cannot be created the session runs on volatile
    /// storage instead: everything works, nothing survives a restart.
    pub fn open(config: AppConfig) -> Self {
        if config.in_memory {
            return Self::with_store(config, KvStore::in_memory());
        }

        let backend = FileBackend::new(config.data_dir.clone());
        let store = match backend.init() {
            Ok(()) => KvStore::new(backend),
            Err(e) => {
                log::warn!(
                    "Data directory {:?} unavailable, changes will not be saved: {}",
                    config.data_dir,
                    e
                );
                KvStore::new(MemoryBackend::new())
            }
        };

        Self::with_store(config, store)
    }

    /// A throwaway session with default configuration
    pub fn in_memory() -> Self {
        Self::with_store(
            AppConfig {
                in_memory: true,
                ..AppConfig::default()
            },
            KvStore::in_memory(),
        )
    }

    pub fn with_store(config: AppConfig, store: KvStore) -> Self {
        Self {
            catalog: MoodCatalog::new(store.clone()),
            history: MoodHistory::new(store.clone()),
            personalization: PersonalizationStore::new(store.clone()),
            config,
            store,
        }
    }

    /// Record a mood selection, snapshotting the mood's name and color.
    ///
    /// The intensity is logged only while intensity tracking is enabled.
    pub fn record_mood(&self, mood_id: &str, intensity: Option<i64>) -> MoodEntry {
        let entry = match self.catalog.get_mood_by_id(mood_id) {
            Some(mood) => self.history.add_entry_for(&mood, None),
            None => {
                log::warn!("Recording unknown mood id {}", mood_id);
                self.history.add_entry(mood_id, None)
            }
        };

        if let Some(intensity) = intensity {
            if self.personalization.settings().enable_intensity_tracking {
                self.personalization.record_intensity(mood_id, intensity);
            }
        }

        entry
    }

    /// Most recent entries for display, newest first
    pub fn recent_entries(&self) -> Vec<MoodEntry> {
        self.history.recent_entries(self.config.recent_limit)
    }
}
