//! Personalization storage implementation
//!
//! The settings aggregate and the intensity log live in two separate slots.
//! Every collection has its own CRUD, but a reset rewrites both slots in a
//! single batch so no listener ever sees one reset without the other.

use uuid::Uuid;

use super::models::*;
use super::suggestions::{
    category_color, find_combination_suggestion, find_palette_preset, subcategory_suggestions,
    CombinationSuggestion, COMBINATION_SUGGESTIONS,
};
use crate::error::{Result, ValidationError};
use crate::moods::color::is_valid_hex_color;
use crate::moods::{MoodCatalog, MoodDefinition};
use crate::storage::{KvStore, Subscription, INTENSITY_HISTORY_KEY, PERSONALIZATION_KEY};

/// Storage for palettes, subcategories, combinations, vocabulary and intensity
#[derive(Clone)]
pub struct PersonalizationStore {
    store: KvStore,
    catalog: MoodCatalog,
}

impl PersonalizationStore {
    pub fn new(store: KvStore) -> Self {
        let catalog = MoodCatalog::new(store.clone());
        Self { store, catalog }
    }

    /// Current settings aggregate
    pub fn settings(&self) -> PersonalizationSettings {
        self.store.read(PERSONALIZATION_KEY, PersonalizationSettings::default())
    }

    fn save_settings(&self, settings: &PersonalizationSettings) {
        self.store.write(PERSONALIZATION_KEY, settings);
    }

    fn intensity_log(&self) -> Vec<MoodIntensity> {
        self.store.read(INTENSITY_HISTORY_KEY, Vec::new())
    }

    // ===== Color Palettes =====

    /// Set the palette for a mood, replacing any existing one
    pub fn set_custom_palette(&self, palette: CustomColorPalette) -> Result<()> {
        for color in [&palette.primary_color, &palette.glow_color] {
            if !is_valid_hex_color(color) {
                return Err(ValidationError::InvalidColor(color.clone()));
            }
        }

        let mut settings = self.settings();
        settings.custom_palettes.retain(|p| p.mood_id != palette.mood_id);
        settings.custom_palettes.push(palette);
        self.save_settings(&settings);
        Ok(())
    }

    /// Use one of the named preset palettes for a mood
    pub fn apply_palette_preset(
        &self,
        mood_id: &str,
        preset_name: &str,
    ) -> Result<CustomColorPalette> {
        let preset = find_palette_preset(preset_name)
            .ok_or_else(|| ValidationError::UnknownPreset(preset_name.to_string()))?;

        let palette = CustomColorPalette {
            mood_id: mood_id.to_string(),
            primary_color: preset.primary.to_string(),
            glow_color: preset.glow.to_string(),
        };
        self.set_custom_palette(palette.clone())?;
        Ok(palette)
    }

    /// Drop a mood's palette override. Returns whether one existed.
    pub fn remove_custom_palette(&self, mood_id: &str) -> bool {
        let mut settings = self.settings();
        let len_before = settings.custom_palettes.len();
        settings.custom_palettes.retain(|p| p.mood_id != mood_id);

        if settings.custom_palettes.len() == len_before {
            return false;
        }

        self.save_settings(&settings);
        true
    }

    /// The palette override for a mood, if any
    pub fn get_custom_palette(&self, mood_id: &str) -> Option<CustomColorPalette> {
        self.settings()
            .custom_palettes
            .into_iter()
            .find(|p| p.mood_id == mood_id)
    }

    /// Colors to render a mood with: the override if set, else its own
    pub fn effective_colors(&self, mood: &MoodDefinition) -> CustomColorPalette {
        self.get_custom_palette(&mood.id)
            .unwrap_or_else(|| CustomColorPalette {
                mood_id: mood.id.clone(),
                primary_color: mood.color.clone(),
                glow_color: mood.glow.clone(),
            })
    }

    // ===== Subcategories =====

    /// Create a subcategory under a mood
    pub fn add_subcategory(&self, request: CreateSubcategoryRequest) -> Result<MoodSubcategory> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let subcategory = MoodSubcategory {
            id: generate_id("sub"),
            name: name.to_string(),
            parent_mood_id: request.parent_mood_id,
            emoji: non_blank(request.emoji),
            description: non_blank(request.description),
            created_at: now_millis(),
        };

        let mut settings = self.settings();
        settings.subcategories.push(subcategory.clone());
        self.save_settings(&settings);

        log::debug!(
            "Added subcategory {} under {}",
            subcategory.name,
            subcategory.parent_mood_id
        );
        Ok(subcategory)
    }

    /// Add a subcategory by name only, as the suggestion chips do
    pub fn add_suggested_subcategory(
        &self,
        parent_mood_id: &str,
        name: &str,
    ) -> Result<MoodSubcategory> {
        self.add_subcategory(CreateSubcategoryRequest {
            name: name.to_string(),
            parent_mood_id: parent_mood_id.to_string(),
            ..Default::default()
        })
    }

    /// Delete a subcategory. Returns whether it existed.
    pub fn remove_subcategory(&self, id: &str) -> bool {
        let mut settings = self.settings();
        let len_before = settings.subcategories.len();
        settings.subcategories.retain(|s| s.id != id);

        if settings.subcategories.len() == len_before {
            return false;
        }

        self.save_settings(&settings);
        true
    }

    /// Subcategories of one mood in creation order
    pub fn get_subcategories_for_mood(&self, parent_mood_id: &str) -> Vec<MoodSubcategory> {
        self.settings()
            .subcategories
            .into_iter()
            .filter(|s| s.parent_mood_id == parent_mood_id)
            .collect()
    }

    /// Suggested names for a mood not yet used by one of its subcategories
    pub fn unused_subcategory_suggestions(&self, parent_mood_id: &str) -> Vec<&'static str> {
        let existing = self.get_subcategories_for_mood(parent_mood_id);
        subcategory_suggestions(parent_mood_id)
            .iter()
            .copied()
            .filter(|s| !existing.iter().any(|e| e.name.eq_ignore_ascii_case(s)))
            .collect()
    }

    // ===== Mood Combinations =====

    /// Create a combination of 2-4 distinct moods
    pub fn add_mood_combination(
        &self,
        request: CreateCombinationRequest,
    ) -> Result<MoodCombination> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_combination_moods(&request.mood_ids)?;

        let emoji = non_blank(request.emoji).or_else(|| self.joined_emoji(&request.mood_ids));

        let combination = MoodCombination {
            id: generate_id("combo"),
            name: name.to_string(),
            description: non_blank(request.description),
            mood_ids: request.mood_ids,
            emoji,
            color: non_blank(request.color),
            created_at: now_millis(),
        };

        let mut settings = self.settings();
        settings.mood_combinations.push(combination.clone());
        self.save_settings(&settings);

        log::debug!("Added mood combination {}", combination.name);
        Ok(combination)
    }

    /// Add one of the ready-made combinations.
    ///
    /// Member moods missing from the catalog are dropped; returns `Ok(None)`
    /// when fewer than two remain, no suggestion has that name, or a
    /// combination with that name already exists.
    pub fn add_suggested_combination(&self, name: &str) -> Result<Option<MoodCombination>> {
        let Some(suggestion) = find_combination_suggestion(name) else {
            return Ok(None);
        };
        if !self
            .unused_combination_suggestions()
            .iter()
            .any(|s| s.name == suggestion.name)
        {
            log::debug!("Combination suggestion {} already added", suggestion.name);
            return Ok(None);
        }

        let valid_ids: Vec<String> = suggestion
            .mood_ids
            .iter()
            .filter(|id| self.catalog.get_mood_by_id(id).is_some())
            .map(|id| id.to_string())
            .collect();

        if valid_ids.len() < MIN_COMBINATION_MOODS {
            return Ok(None);
        }

        self.add_mood_combination(CreateCombinationRequest {
            name: suggestion.name.to_string(),
            mood_ids: valid_ids,
            emoji: Some(suggestion.emoji.to_string()),
            ..Default::default()
        })
        .map(Some)
    }

    /// Suggestions whose name is not already used by a combination
    pub fn unused_combination_suggestions(&self) -> Vec<&'static CombinationSuggestion> {
        let existing = self.settings().mood_combinations;
        COMBINATION_SUGGESTIONS
            .iter()
            .filter(|s| {
                !existing
                    .iter()
                    .any(|e| e.name.to_lowercase() == s.name.to_lowercase())
            })
            .collect()
    }

    /// Delete a combination. Returns whether it existed.
    pub fn remove_mood_combination(&self, id: &str) -> bool {
        let mut settings = self.settings();
        let len_before = settings.mood_combinations.len();
        settings.mood_combinations.retain(|c| c.id != id);

        if settings.mood_combinations.len() == len_before {
            return false;
        }

        self.save_settings(&settings);
        true
    }

    /// Merge a partial update. `Ok(None)` if the id is unknown.
    pub fn update_mood_combination(
        &self,
        id: &str,
        updates: UpdateCombinationRequest,
    ) -> Result<Option<MoodCombination>> {
        let mut settings = self.settings();
        let Some(combination) = settings.mood_combinations.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &updates.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
        }
        if let Some(mood_ids) = &updates.mood_ids {
            validate_combination_moods(mood_ids)?;
        }

        if let Some(name) = updates.name {
            combination.name = name.trim().to_string();
        }
        if updates.description.is_some() {
            combination.description = non_blank(updates.description);
        }
        if let Some(mood_ids) = updates.mood_ids {
            combination.mood_ids = mood_ids;
        }
        if updates.emoji.is_some() {
            combination.emoji = non_blank(updates.emoji);
        }
        if updates.color.is_some() {
            combination.color = non_blank(updates.color);
        }

        let updated = combination.clone();
        self.save_settings(&settings);
        Ok(Some(updated))
    }

    fn joined_emoji(&self, mood_ids: &[String]) -> Option<String> {
        let joined: String = mood_ids
            .iter()
            .filter_map(|id| self.catalog.get_mood_by_id(id))
            .map(|m| m.emoji)
            .collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    // ===== Vocabulary =====

    /// Add a vocabulary word; without a color it takes its category's color
    pub fn add_custom_word(&self, request: CreateWordRequest) -> Result<CustomVocabulary> {
        let word = request.word.trim();
        if word.is_empty() {
            return Err(ValidationError::EmptyWord);
        }

        let color = non_blank(request.color)
            .or_else(|| request.category.map(|c| category_color(c).to_string()));

        let entry = CustomVocabulary {
            id: generate_id("vocab"),
            word: word.to_string(),
            definition: non_blank(request.definition),
            related_mood_ids: request.related_mood_ids,
            emoji: non_blank(request.emoji),
            color,
            category: request.category,
            created_at: now_millis(),
        };

        let mut settings = self.settings();
        settings.custom_vocabulary.push(entry.clone());
        self.save_settings(&settings);

        log::debug!("Added vocabulary word {}", entry.word);
        Ok(entry)
    }

    /// Delete a vocabulary word. Returns whether it existed.
    pub fn remove_custom_word(&self, id: &str) -> bool {
        let mut settings = self.settings();
        let len_before = settings.custom_vocabulary.len();
        settings.custom_vocabulary.retain(|w| w.id != id);

        if settings.custom_vocabulary.len() == len_before {
            return false;
        }

        self.save_settings(&settings);
        true
    }

    /// Merge a partial update. `Ok(None)` if the id is unknown.
    pub fn update_custom_word(
        &self,
        id: &str,
        updates: UpdateWordRequest,
    ) -> Result<Option<CustomVocabulary>> {
        let mut settings = self.settings();
        let Some(entry) = settings.custom_vocabulary.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };

        if let Some(word) = &updates.word {
            if word.trim().is_empty() {
                return Err(ValidationError::EmptyWord);
            }
        }

        if let Some(word) = updates.word {
            entry.word = word.trim().to_string();
        }
        if updates.definition.is_some() {
            entry.definition = non_blank(updates.definition);
        }
        if let Some(related) = updates.related_mood_ids {
            entry.related_mood_ids = related;
        }
        if updates.emoji.is_some() {
            entry.emoji = non_blank(updates.emoji);
        }
        if updates.color.is_some() {
            entry.color = non_blank(updates.color);
        }
        if updates.category.is_some() {
            entry.category = updates.category;
        }

        let updated = entry.clone();
        self.save_settings(&settings);
        Ok(Some(updated))
    }

    /// Words whose text or definition contains `query`, ignoring case
    pub fn search_vocabulary(&self, query: &str) -> Vec<CustomVocabulary> {
        let query = query.trim().to_lowercase();
        self.settings()
            .custom_vocabulary
            .into_iter()
            .filter(|v| {
                v.word.to_lowercase().contains(&query)
                    || v
                        .definition
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .collect()
    }

    // ===== Intensity =====

    /// Append an intensity rating, clamped into 1-10
    pub fn record_intensity(&self, mood_id: &str, intensity: i64) -> MoodIntensity {
        let entry = MoodIntensity {
            mood_id: mood_id.to_string(),
            intensity: clamp_intensity(intensity),
            timestamp: now_millis(),
        };

        let mut events = self.intensity_log();
        events.push(entry.clone());
        self.store.write(INTENSITY_HISTORY_KEY, &events);
        entry
    }

    /// Intensity events, optionally for one mood, trimmed to the last `limit`.
    ///
    /// A limit of zero means no limit.
    pub fn get_intensity_history(
        &self,
        mood_id: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<MoodIntensity> {
        let mut history: Vec<MoodIntensity> = self
            .intensity_log()
            .into_iter()
            .filter(|h| mood_id.map_or(true, |id| h.mood_id == id))
            .collect();

        if let Some(limit) = limit.filter(|&n| n > 0) {
            let skip = history.len().saturating_sub(limit);
            history.drain(..skip);
        }

        history
    }

    /// Set the default intensity, clamped into 1-10
    pub fn set_default_intensity(&self, intensity: i64) {
        let mut settings = self.settings();
        settings.default_intensity = clamp_intensity(intensity);
        self.save_settings(&settings);
    }

    /// Turn intensity tracking on or off
    pub fn toggle_intensity_tracking(&self, enabled: bool) {
        let mut settings = self.settings();
        settings.enable_intensity_tracking = enabled;
        self.save_settings(&settings);
    }

    // ===== Reset & Statistics =====

    /// Restore default settings and clear the intensity log together
    pub fn reset_all_personalization(&self) -> bool {
        let mut batch = self.store.batch();
        batch
            .put(PERSONALIZATION_KEY, &PersonalizationSettings::default())
            .put(INTENSITY_HISTORY_KEY, &Vec::<MoodIntensity>::new());
        let durable = batch.commit();

        log::info!("Reset all personalization");
        durable
    }

    /// Collection sizes, recomputed on every call
    pub fn stats(&self) -> PersonalizationStats {
        let settings = self.settings();
        PersonalizationStats {
            total_custom_palettes: settings.custom_palettes.len(),
            total_subcategories: settings.subcategories.len(),
            total_combinations: settings.mood_combinations.len(),
            total_custom_words: settings.custom_vocabulary.len(),
            total_intensity_records: self.intensity_log().len(),
        }
    }

    /// Listen for changes to the settings or the intensity log
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.store.subscribe(move |key| {
            if key == PERSONALIZATION_KEY || key == INTENSITY_HISTORY_KEY {
                listener();
            }
        })
    }
}

fn validate_combination_moods(mood_ids: &[String]) -> Result<()> {
    if !(MIN_COMBINATION_MOODS..=MAX_COMBINATION_MOODS).contains(&mood_ids.len()) {
        return Err(ValidationError::CombinationSize(mood_ids.len()));
    }
    for (i, id) in mood_ids.iter().enumerate() {
        if mood_ids[..i].contains(id) {
            return Err(ValidationError::DuplicateCombinationMood(id.clone()));
        }
    }
    Ok(())
}

fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moods::{CustomMoodDraft, MoodCategory};
    use crate::storage::MemoryBackend;

    fn create_test_store() -> PersonalizationStore {
        PersonalizationStore::new(KvStore::in_memory())
    }

    fn combo(name: &str, ids: &[&str]) -> CreateCombinationRequest {
        CreateCombinationRequest {
            name: name.to_string(),
            mood_ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn palette(mood_id: &str, primary: &str) -> CustomColorPalette {
        CustomColorPalette {
            mood_id: mood_id.to_string(),
            primary_color: primary.to_string(),
            glow_color: "#FFFFFF".to_string(),
        }
    }

    #[test]
    fn test_palette_upsert_replaces() {
        let store = create_test_store();
        store.set_custom_palette(palette("happy", "#111111")).unwrap();
        store.set_custom_palette(palette("happy", "#222222")).unwrap();

        let settings = store.settings();
        assert_eq!(settings.custom_palettes.len(), 1);
        assert_eq!(
            store.get_custom_palette("happy").unwrap().primary_color,
            "#222222"
        );
    }

    #[test]
    fn test_palette_rejects_invalid_color() {
        let store = create_test_store();
        assert!(matches!(
            store.set_custom_palette(palette("happy", "red")),
            Err(ValidationError::InvalidColor(_))
        ));
        assert!(store.settings().custom_palettes.is_empty());
    }

    #[test]
    fn test_remove_palette_twice() {
        let store = create_test_store();
        store.set_custom_palette(palette("sad", "#123456")).unwrap();

        assert!(store.remove_custom_palette("sad"));
        assert!(!store.remove_custom_palette("sad"));
        assert!(store.get_custom_palette("sad").is_none());
    }

    #[test]
    fn test_apply_preset_and_effective_colors() {
        let store = create_test_store();
        let happy = MoodCatalog::new(KvStore::in_memory())
            .get_mood_by_id("happy")
            .unwrap();

        assert_eq!(store.effective_colors(&happy).primary_color, "#FFD93D");

        store.apply_palette_preset("happy", "Ocean").unwrap();
        let colors = store.effective_colors(&happy);
        assert_eq!(colors.primary_color, "#4ECDC4");
        assert_eq!(colors.glow_color, "#7FFFD4");

        assert!(matches!(
            store.apply_palette_preset("happy", "Neon"),
            Err(ValidationError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_subcategories_filter_by_parent() {
        let store = create_test_store();
        let work = store
            .add_subcategory(CreateSubcategoryRequest {
                name: " Work Stress ".to_string(),
                parent_mood_id: "stressed".to_string(),
                emoji: Some("💼".to_string()),
                description: Some("   ".to_string()),
            })
            .unwrap();
        store.add_suggested_subcategory("sad", "Grief").unwrap();

        assert_eq!(work.name, "Work Stress");
        assert!(work.id.starts_with("sub-"));
        assert!(work.description.is_none());

        let stressed = store.get_subcategories_for_mood("stressed");
        assert_eq!(stressed, vec![work.clone()]);

        assert!(store.remove_subcategory(&work.id));
        assert!(!store.remove_subcategory(&work.id));
        assert!(store.get_subcategories_for_mood("stressed").is_empty());
    }

    #[test]
    fn test_blank_subcategory_rejected() {
        let store = create_test_store();
        assert_eq!(
            store.add_suggested_subcategory("sad", "  "),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn test_unused_subcategory_suggestions() {
        let store = create_test_store();
        store.add_suggested_subcategory("stressed", "work stress").unwrap();

        let unused = store.unused_subcategory_suggestions("stressed");
        assert_eq!(unused.len(), 4);
        assert!(!unused.contains(&"Work Stress"));
    }

    #[test]
    fn test_combination_size_rules() {
        let store = create_test_store();

        assert_eq!(
            store.add_mood_combination(combo("x", &["happy"])),
            Err(ValidationError::CombinationSize(1))
        );
        assert_eq!(
            store.add_mood_combination(combo("x", &["a", "b", "c", "d", "e"])),
            Err(ValidationError::CombinationSize(5))
        );
        assert!(store.settings().mood_combinations.is_empty());

        let created = store
            .add_mood_combination(combo("Bittersweet", &["happy", "sad"]))
            .unwrap();
        assert_eq!(created.mood_ids, vec!["happy".to_string(), "sad".to_string()]);
        assert!(created.id.starts_with("combo-"));
    }

    #[test]
    fn test_combination_rejects_blank_name_and_duplicates() {
        let store = create_test_store();
        assert_eq!(
            store.add_mood_combination(combo("  ", &["happy", "sad"])),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            store.add_mood_combination(combo("Twice", &["happy", "happy"])),
            Err(ValidationError::DuplicateCombinationMood("happy".to_string()))
        );
    }

    #[test]
    fn test_combination_default_emoji() {
        let store = create_test_store();
        let created = store
            .add_mood_combination(combo("Bittersweet", &["happy", "sad"]))
            .unwrap();
        assert_eq!(created.emoji.as_deref(), Some("😊😢"));

        let explicit = store
            .add_mood_combination(CreateCombinationRequest {
                emoji: Some("🌗".to_string()),
                ..combo("Mixed", &["happy", "sad"])
            })
            .unwrap();
        assert_eq!(explicit.emoji.as_deref(), Some("🌗"));

        let unknown = store
            .add_mood_combination(combo("Ghosts", &["gone-1", "gone-2"]))
            .unwrap();
        assert!(unknown.emoji.is_none());
    }

    #[test]
    fn test_update_combination() {
        let store = create_test_store();
        let created = store
            .add_mood_combination(combo("Bittersweet", &["happy", "sad"]))
            .unwrap();

        let updated = store
            .update_mood_combination(
                &created.id,
                UpdateCombinationRequest {
                    description: Some("Smiling through it".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Bittersweet");
        assert_eq!(updated.description.as_deref(), Some("Smiling through it"));
        assert_eq!(updated.created_at, created.created_at);

        assert_eq!(
            store.update_mood_combination(
                &created.id,
                UpdateCombinationRequest {
                    mood_ids: Some(vec!["happy".to_string()]),
                    ..Default::default()
                },
            ),
            Err(ValidationError::CombinationSize(1))
        );

        assert_eq!(
            store
                .update_mood_combination("missing", UpdateCombinationRequest::default())
                .unwrap(),
            None
        );

        assert!(store.remove_mood_combination(&created.id));
        assert!(!store.remove_mood_combination(&created.id));
    }

    #[test]
    fn test_suggested_combinations() {
        let store = create_test_store();
        assert_eq!(store.unused_combination_suggestions().len(), 6);

        let added = store
            .add_suggested_combination("Calm but Alert")
            .unwrap()
            .unwrap();
        assert_eq!(added.mood_ids, vec!["calm".to_string(), "energized".to_string()]);
        assert_eq!(added.emoji.as_deref(), Some("😌⚡"));

        let unused = store.unused_combination_suggestions();
        assert_eq!(unused.len(), 5);
        assert!(unused.iter().all(|s| s.name != "Calm but Alert"));

        assert_eq!(store.add_suggested_combination("Nope").unwrap(), None);
    }

    #[test]
    fn test_suggested_combination_added_once() {
        let store = create_test_store();
        assert!(store.add_suggested_combination("Calm but Alert").unwrap().is_some());
        assert_eq!(store.add_suggested_combination("calm but alert").unwrap(), None);
        assert_eq!(store.settings().mood_combinations.len(), 1);
    }

    #[test]
    fn test_update_missing_id_is_noop_before_validation() {
        let store = create_test_store();
        assert_eq!(
            store.update_mood_combination(
                "missing",
                UpdateCombinationRequest {
                    mood_ids: Some(vec!["happy".to_string()]),
                    name: Some("   ".to_string()),
                    ..Default::default()
                },
            ),
            Ok(None)
        );
        assert_eq!(
            store.update_custom_word(
                "missing",
                UpdateWordRequest {
                    word: Some(" ".to_string()),
                    ..Default::default()
                },
            ),
            Ok(None)
        );
    }

    #[test]
    fn test_vocabulary_crud_and_search() {
        let store = create_test_store();
        let word = store
            .add_custom_word(CreateWordRequest {
                word: " Sonder ".to_string(),
                definition: Some("Realizing everyone has a vivid inner life".to_string()),
                related_mood_ids: vec!["philosophical".to_string()],
                category: Some(MoodCategory::Neutral),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(word.word, "Sonder");
        assert_eq!(word.color.as_deref(), Some("#9C27B0"));

        assert_eq!(store.search_vocabulary("VIVID").len(), 1);
        assert_eq!(store.search_vocabulary("sond").len(), 1);
        assert!(store.search_vocabulary("xyz").is_empty());

        let updated = store
            .update_custom_word(
                &word.id,
                UpdateWordRequest {
                    category: Some(MoodCategory::Calm),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.category, Some(MoodCategory::Calm));
        assert_eq!(updated.word, "Sonder");

        assert!(store.remove_custom_word(&word.id));
        assert!(!store.remove_custom_word(&word.id));
        assert_eq!(
            store
                .update_custom_word(&word.id, UpdateWordRequest::default())
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_blank_word_rejected() {
        let store = create_test_store();
        assert_eq!(
            store.add_custom_word(CreateWordRequest {
                word: "   ".to_string(),
                ..Default::default()
            }),
            Err(ValidationError::EmptyWord)
        );
    }

    #[test]
    fn test_record_intensity_clamps() {
        let store = create_test_store();
        assert_eq!(store.record_intensity("anxious", 15).intensity, 10);
        assert_eq!(store.record_intensity("anxious", 0).intensity, 1);

        let history = store.get_intensity_history(Some("anxious"), None);
        assert_eq!(
            history.iter().map(|h| h.intensity).collect::<Vec<_>>(),
            vec![10, 1]
        );
    }

    #[test]
    fn test_intensity_history_filter_and_limit() {
        let store = create_test_store();
        store.record_intensity("happy", 3);
        store.record_intensity("sad", 4);
        store.record_intensity("happy", 5);
        store.record_intensity("happy", 6);

        assert_eq!(store.get_intensity_history(None, None).len(), 4);

        let last_two = store.get_intensity_history(Some("happy"), Some(2));
        assert_eq!(
            last_two.iter().map(|h| h.intensity).collect::<Vec<_>>(),
            vec![5, 6]
        );

        assert_eq!(store.get_intensity_history(None, Some(10)).len(), 4);
        assert_eq!(store.get_intensity_history(None, Some(0)).len(), 4);
    }

    #[test]
    fn test_stored_intensities_clamped_on_read() {
        let backend = MemoryBackend::new()
            .with_slot(PERSONALIZATION_KEY, r#"{"defaultIntensity":0}"#)
            .with_slot(
                INTENSITY_HISTORY_KEY,
                r#"[{"moodId":"happy","intensity":42,"timestamp":1773129600000}]"#,
            );
        let store = PersonalizationStore::new(KvStore::new(backend));

        let settings = store.settings();
        assert_eq!(settings.default_intensity, MIN_INTENSITY);
        assert!(settings.enable_intensity_tracking);
        assert_eq!(store.get_intensity_history(None, None)[0].intensity, MAX_INTENSITY);
    }

    #[test]
    fn test_intensity_settings() {
        let store = create_test_store();
        store.set_default_intensity(42);
        assert_eq!(store.settings().default_intensity, 10);

        store.toggle_intensity_tracking(false);
        assert!(!store.settings().enable_intensity_tracking);
    }

    #[test]
    fn test_reset_clears_settings_and_intensity_together() {
        let store = create_test_store();
        store.set_custom_palette(palette("happy", "#111111")).unwrap();
        store.add_mood_combination(combo("Bittersweet", &["happy", "sad"])).unwrap();
        store.set_default_intensity(9);
        store.record_intensity("happy", 7);

        assert!(store.reset_all_personalization());

        assert!(
            store.get_intensity_history(None, None).is_empty()
                && store.settings() == PersonalizationSettings::default()
        );
        assert_eq!(store.stats(), PersonalizationStats::default());
    }

    #[test]
    fn test_reset_observers_see_both_slots_cleared() {
        use std::sync::{Arc, Mutex};

        let store = create_test_store();
        store.set_default_intensity(9);
        store.record_intensity("happy", 7);

        let observer = store.clone();
        let observations = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observations);
        let _sub = store.subscribe(move || {
            let cleared_settings = observer.settings() == PersonalizationSettings::default();
            let cleared_log = observer.get_intensity_history(None, None).is_empty();
            sink.lock().unwrap().push((cleared_settings, cleared_log));
        });

        store.reset_all_personalization();

        let observations = observations.lock().unwrap();
        assert!(!observations.is_empty());
        assert!(observations.iter().all(|&(s, l)| s && l));
    }

    #[test]
    fn test_stats_count_collections() {
        let store = create_test_store();
        store.set_custom_palette(palette("happy", "#111111")).unwrap();
        store.add_suggested_subcategory("sad", "Grief").unwrap();
        store.add_suggested_subcategory("sad", "Heartbreak").unwrap();
        store.add_mood_combination(combo("Bittersweet", &["happy", "sad"])).unwrap();
        store
            .add_custom_word(CreateWordRequest {
                word: "Hygge".to_string(),
                ..Default::default()
            })
            .unwrap();
        store.record_intensity("happy", 4);

        assert_eq!(
            store.stats(),
            PersonalizationStats {
                total_custom_palettes: 1,
                total_subcategories: 2,
                total_combinations: 1,
                total_custom_words: 1,
                total_intensity_records: 1,
            }
        );
    }

    #[test]
    fn test_dangling_references_survive_mood_deletion() {
        let kv = KvStore::in_memory();
        let catalog = MoodCatalog::new(kv.clone());
        let store = PersonalizationStore::new(kv);

        let zen = catalog
            .save_custom_mood(CustomMoodDraft {
                name: "Zen".to_string(),
                emoji: "🧘".to_string(),
                color: "#4FC3F7".to_string(),
                category: MoodCategory::Calm,
            })
            .unwrap();
        store.add_suggested_subcategory(&zen.id, "Morning Zen").unwrap();
        let combination = store
            .add_mood_combination(combo("Zen and Happy", &[zen.id.as_str(), "happy"]))
            .unwrap();
        assert_eq!(combination.emoji.as_deref(), Some("🧘😊"));

        assert!(catalog.delete_custom_mood(&zen.id));

        assert_eq!(store.get_subcategories_for_mood(&zen.id).len(), 1);
        assert_eq!(store.settings().mood_combinations[0].mood_ids[0], zen.id);
        assert_eq!(catalog.display_name(&zen.id), "Unknown mood");
    }

    #[test]
    fn test_settings_round_trip_through_store() {
        let kv = KvStore::in_memory();
        let store = PersonalizationStore::new(kv.clone());
        store.set_custom_palette(palette("happy", "#111111")).unwrap();
        store.add_suggested_subcategory("sad", "Grief").unwrap();
        store.add_mood_combination(combo("Bittersweet", &["happy", "sad"])).unwrap();
        store.set_default_intensity(3);

        let settings = store.settings();
        kv.write("copy", &settings);
        let restored: PersonalizationSettings = kv.read("copy", PersonalizationSettings::default());
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_degraded_storage_keeps_session_working() {
        let store = PersonalizationStore::new(KvStore::new(MemoryBackend::failing()));

        store.add_suggested_subcategory("sad", "Grief").unwrap();
        store.record_intensity("sad", 6);

        assert_eq!(store.stats().total_subcategories, 1);
        assert_eq!(store.stats().total_intensity_records, 1);
        assert!(!store.reset_all_personalization());
        assert_eq!(store.stats(), PersonalizationStats::default());
    }
}
