//! Unified mood catalog: built-in definitions plus user-created moods

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use super::builtin::{get_builtin_moods, is_builtin_id};
use super::color::{generate_glow_color, is_valid_hex_color};
use super::models::{CustomMoodDraft, MoodCategory, MoodDefinition};
use crate::error::{Result, ValidationError};
use crate::storage::{KvStore, Subscription, CUSTOM_MOODS_KEY};

/// Label shown for ids that no longer resolve to a mood
pub const UNKNOWN_MOOD_LABEL: &str = "Unknown mood";

/// Mood catalog backed by the custom-moods slot
#[derive(Clone)]
pub struct MoodCatalog {
    store: KvStore,
}

impl MoodCatalog {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// User-created moods in creation order
    pub fn custom_moods(&self) -> Vec<MoodDefinition> {
        self.store.read(CUSTOM_MOODS_KEY, Vec::new())
    }

    fn save_custom_moods(&self, moods: &[MoodDefinition]) {
        self.store.write(CUSTOM_MOODS_KEY, moods);
    }

    /// Built-ins in catalog order followed by custom moods in creation order
    pub fn get_all_moods(&self) -> Vec<MoodDefinition> {
        let mut moods = get_builtin_moods();
        moods.extend(self.custom_moods());
        moods
    }

    /// Look up a built-in or custom mood
    pub fn get_mood_by_id(&self, id: &str) -> Option<MoodDefinition> {
        self.get_all_moods().into_iter().find(|m| m.id == id)
    }

    pub fn get_moods_by_category(&self, category: MoodCategory) -> Vec<MoodDefinition> {
        self.get_all_moods()
            .into_iter()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Case-insensitive name match against every mood, built-in or custom
    pub fn mood_name_exists(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.get_all_moods()
            .iter()
            .any(|m| m.name.trim().to_lowercase() == needle)
    }

    /// Display name for an id, tolerating dangling references
    pub fn display_name(&self, id: &str) -> String {
        self.get_mood_by_id(id)
            .map(|m| m.name)
            .unwrap_or_else(|| UNKNOWN_MOOD_LABEL.to_string())
    }

    /// Validate and store a new custom mood
    pub fn save_custom_mood(&self, draft: CustomMoodDraft) -> Result<MoodDefinition> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyMoodName);
        }
        if self.mood_name_exists(name) {
            return Err(ValidationError::DuplicateMoodName(name.to_string()));
        }
        let color = draft.color.trim();
        if !is_valid_hex_color(color) {
            return Err(ValidationError::InvalidColor(color.to_string()));
        }

        let mood = MoodDefinition {
            id: self.generate_id(name),
            name: name.to_string(),
            emoji: draft.emoji,
            color: color.to_string(),
            glow: generate_glow_color(color),
            category: draft.category,
            is_custom: true,
        };

        let mut moods = self.custom_moods();
        moods.push(mood.clone());
        self.save_custom_moods(&moods);

        log::info!("Created custom mood: {} ({})", mood.name, mood.id);
        Ok(mood)
    }

    /// Delete a custom mood. Built-ins and unknown ids are left alone.
    ///
    /// Personalization records that reference the id are kept and will
    /// resolve to [`UNKNOWN_MOOD_LABEL`].
    pub fn delete_custom_mood(&self, id: &str) -> bool {
        if is_builtin_id(id) {
            log::debug!("Refusing to delete built-in mood {}", id);
            return false;
        }

        let mut moods = self.custom_moods();
        let len_before = moods.len();
        moods.retain(|m| m.id != id);

        if moods.len() == len_before {
            return false;
        }

        self.save_custom_moods(&moods);
        log::info!("Deleted custom mood {}", id);
        true
    }

    /// Listen for changes to the custom mood list
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.store.subscribe(move |key| {
            if key == CUSTOM_MOODS_KEY {
                listener();
            }
        })
    }

    fn generate_id(&self, name: &str) -> String {
        let slug = slugify(name);
        let existing = self.get_all_moods();
        loop {
            let suffix = Uuid::new_v4().simple().to_string();
            let id = format!("custom-{}-{}", slug, &suffix[..8]);
            if !existing.iter().any(|m| m.id == id) {
                return id;
            }
        }
    }
}

fn slugify(name: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));
    let slug = re.replace_all(&name.to_lowercase(), "-").trim_matches('-').to_string();
    if slug.is_empty() {
        "mood".to_string()
    } else {
        slug
    }
}
