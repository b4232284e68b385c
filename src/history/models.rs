//! Mood history data models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped record of the user selecting a mood.
///
/// Older records may carry only the name/color snapshot without a mood id;
/// every record has at least one of the two.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "StoredMoodEntry")]
pub struct MoodEntry {
    /// Unique identifier
    pub id: String,
    /// Selected mood
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_id: Option<String>,
    /// Mood name at the time of selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    /// Mood color at the time of selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// When the mood was selected (RFC 3339)
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    /// Key used for counting: the mood id, or the snapshot name when there is none
    pub fn mood_key(&self) -> &str {
        self.mood_id
            .as_deref()
            .or(self.emotion.as_deref())
            .unwrap_or_default()
    }
}

/// On-disk shape of a history record, before the id-or-snapshot check
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMoodEntry {
    id: String,
    #[serde(default, alias = "mood")]
    mood_id: Option<String>,
    #[serde(default)]
    emotion: Option<String>,
    #[serde(default)]
    color: Option<String>,
    timestamp: DateTime<Utc>,
}

impl TryFrom<StoredMoodEntry> for MoodEntry {
    type Error = String;

    fn try_from(stored: StoredMoodEntry) -> Result<Self, Self::Error> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let mood_id = non_blank(stored.mood_id);
        let emotion = non_blank(stored.emotion);

        if mood_id.is_none() && emotion.is_none() {
            return Err(format!("history entry {} has neither a mood nor an emotion", stored.id));
        }

        Ok(Self {
            id: stored.id,
            mood_id,
            emotion,
            color: stored.color,
            timestamp: stored.timestamp,
        })
    }
}

/// Aggregate statistics over the whole history (computed, not stored)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub total_entries: usize,
    /// Entries on the current local calendar day
    pub today_entries: usize,
    /// Entries within the trailing 7 x 24 hours
    pub week_entries: usize,
    /// Most frequent mood key; ties go to the mood seen first
    pub most_common_mood: Option<String>,
    /// Mood id (or snapshot name) -> number of entries
    pub mood_counts: HashMap<String, usize>,
}

/// One bar of the mood distribution view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodDistributionItem {
    pub mood_id: String,
    /// Catalog name, or the raw key when the mood is not in the catalog
    pub name: String,
    pub color: String,
    pub count: usize,
}
