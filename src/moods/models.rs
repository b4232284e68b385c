//! Mood definition data models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Emotional family a mood belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Positive,
    Negative,
    Calm,
    // Older custom moods were saved as "energy"
    #[serde(alias = "energy")]
    Energetic,
    Stress,
    Intense,
    Neutral,
    Playful,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 8] = [
        MoodCategory::Positive,
        MoodCategory::Negative,
        MoodCategory::Calm,
        MoodCategory::Energetic,
        MoodCategory::Stress,
        MoodCategory::Intense,
        MoodCategory::Neutral,
        MoodCategory::Playful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Positive => "positive",
            MoodCategory::Negative => "negative",
            MoodCategory::Calm => "calm",
            MoodCategory::Energetic => "energetic",
            MoodCategory::Stress => "stress",
            MoodCategory::Intense => "intense",
            MoodCategory::Neutral => "neutral",
            MoodCategory::Playful => "playful",
        }
    }

    /// Parse a category name, accepting the legacy "energy" spelling
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if value == "energy" {
            return Some(MoodCategory::Energetic);
        }
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry describing one emotional state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodDefinition {
    /// Unique slug-like identifier
    pub id: String,
    pub name: String,
    pub emoji: String,
    /// Primary color (hex)
    pub color: String,
    /// Accent glow color (hex)
    pub glow: String,
    pub category: MoodCategory,
    /// User-created rather than built in
    #[serde(default)]
    pub is_custom: bool,
}

/// Request to create a custom mood
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMoodDraft {
    pub name: String,
    pub emoji: String,
    /// Primary color (hex); the glow is derived from it
    pub color: String,
    pub category: MoodCategory,
}
