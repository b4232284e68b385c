//! Personalization data models

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::moods::MoodCategory;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;
pub const DEFAULT_INTENSITY: u8 = 5;

pub const MIN_COMBINATION_MOODS: usize = 2;
pub const MAX_COMBINATION_MOODS: usize = 4;

/// Clamp a raw rating into the 1-10 intensity scale
pub fn clamp_intensity(value: i64) -> u8 {
    value.clamp(MIN_INTENSITY as i64, MAX_INTENSITY as i64) as u8
}

/// Current time at the millisecond precision used on disk
/// Read a stored intensity, clamping it into range
fn deserialize_intensity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(clamp_intensity(value.round() as i64))
}

pub(crate) fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Color override for one mood (at most one per mood)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomColorPalette {
    pub mood_id: String,
    pub primary_color: String,
    pub glow_color: String,
}

/// A user-defined refinement of a mood, e.g. "Work Stress" under "Stressed"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodSubcategory {
    pub id: String,
    pub name: String,
    pub parent_mood_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// A named, ordered set of 2-4 moods felt together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodCombination {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mood_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// A user-defined emotional term
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomVocabulary {
    pub id: String,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default)]
    pub related_mood_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MoodCategory>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// One intensity rating event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodIntensity {
    pub mood_id: String,
    /// 1-10
    #[serde(deserialize_with = "deserialize_intensity")]
    pub intensity: u8,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Everything the user customized, persisted as one document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalizationSettings {
    pub custom_palettes: Vec<CustomColorPalette>,
    pub subcategories: Vec<MoodSubcategory>,
    pub mood_combinations: Vec<MoodCombination>,
    pub custom_vocabulary: Vec<CustomVocabulary>,
    #[serde(deserialize_with = "deserialize_intensity")]
    pub default_intensity: u8,
    pub enable_intensity_tracking: bool,
}

impl Default for PersonalizationSettings {
    fn default() -> Self {
        Self {
            custom_palettes: Vec::new(),
            subcategories: Vec::new(),
            mood_combinations: Vec::new(),
            custom_vocabulary: Vec::new(),
            default_intensity: DEFAULT_INTENSITY,
            enable_intensity_tracking: true,
        }
    }
}

/// Request to create a subcategory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubcategoryRequest {
    pub name: String,
    pub parent_mood_id: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
}

/// Request to create a mood combination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCombinationRequest {
    pub name: String,
    pub description: Option<String>,
    pub mood_ids: Vec<String>,
    /// Defaults to the member moods' emoji joined together
    pub emoji: Option<String>,
    pub color: Option<String>,
}

/// Partial update of a mood combination; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCombinationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mood_ids: Option<Vec<String>>,
    pub emoji: Option<String>,
    pub color: Option<String>,
}

/// Request to add a vocabulary word
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWordRequest {
    pub word: String,
    pub definition: Option<String>,
    #[serde(default)]
    pub related_mood_ids: Vec<String>,
    pub emoji: Option<String>,
    /// Defaults to the category's color when a category is given
    pub color: Option<String>,
    pub category: Option<MoodCategory>,
}

/// Partial update of a vocabulary word; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWordRequest {
    pub word: Option<String>,
    pub definition: Option<String>,
    pub related_mood_ids: Option<Vec<String>>,
    pub emoji: Option<String>,
    pub color: Option<String>,
    pub category: Option<MoodCategory>,
}

/// Collection sizes (computed, not stored)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationStats {
    pub total_custom_palettes: usize,
    pub total_subcategories: usize,
    pub total_combinations: usize,
    pub total_custom_words: usize,
    pub total_intensity_records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_intensity() {
        assert_eq!(clamp_intensity(15), 10);
        assert_eq!(clamp_intensity(0), 1);
        assert_eq!(clamp_intensity(-3), 1);
        assert_eq!(clamp_intensity(7), 7);
    }

    #[test]
    fn test_default_settings() {
        let settings = PersonalizationSettings::default();
        assert_eq!(settings.default_intensity, 5);
        assert!(settings.enable_intensity_tracking);
        assert!(settings.custom_palettes.is_empty());
    }

    #[test]
    fn test_settings_use_original_field_names() {
        let json = serde_json::to_value(PersonalizationSettings::default()).unwrap();
        assert!(json.get("customPalettes").is_some());
        assert!(json.get("moodCombinations").is_some());
        assert!(json.get("customVocabulary").is_some());
        assert_eq!(json["defaultIntensity"], 5);
        assert_eq!(json["enableIntensityTracking"], true);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: PersonalizationSettings =
            serde_json::from_str(r#"{"defaultIntensity": 8}"#).unwrap();
        assert_eq!(settings.default_intensity, 8);
        assert!(settings.enable_intensity_tracking);
    }

    #[test]
    fn test_out_of_range_intensities_clamped() {
        let settings: PersonalizationSettings =
            serde_json::from_str(r#"{"defaultIntensity": 0}"#).unwrap();
        assert_eq!(settings.default_intensity, 1);

        let settings: PersonalizationSettings =
            serde_json::from_str(r#"{"defaultIntensity": 12.6}"#).unwrap();
        assert_eq!(settings.default_intensity, 10);

        let event: MoodIntensity = serde_json::from_str(
            r#"{"moodId":"sad","intensity":-4,"timestamp":1767225600000}"#,
        )
        .unwrap();
        assert_eq!(event.intensity, 1);
    }

    #[test]
    fn test_created_at_is_epoch_millis() {
        let json = r##"{"id":"sub-1","name":"Work Stress","parentMoodId":"stressed","createdAt":1767225600000}"##;
        let sub: MoodSubcategory = serde_json::from_str(json).unwrap();
        assert_eq!(sub.created_at.timestamp_millis(), 1_767_225_600_000);
        assert!(sub.emoji.is_none());
    }
}
