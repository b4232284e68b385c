//! Preset palettes and suggestion lists offered by the personalization screens

use crate::moods::MoodCategory;

/// A named primary/glow color pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalettePreset {
    pub name: &'static str,
    pub primary: &'static str,
    pub glow: &'static str,
}

pub const COLOR_PALETTE_OPTIONS: &[PalettePreset] = &[
    PalettePreset { name: "Sunset", primary: "#FF6B6B", glow: "#FFA07A" },
    PalettePreset { name: "Ocean", primary: "#4ECDC4", glow: "#7FFFD4" },
    PalettePreset { name: "Forest", primary: "#2D5A27", glow: "#90EE90" },
    PalettePreset { name: "Berry", primary: "#9B59B6", glow: "#D2B4DE" },
    PalettePreset { name: "Golden", primary: "#F39C12", glow: "#F7DC6F" },
    PalettePreset { name: "Rose", primary: "#E91E63", glow: "#F8BBD9" },
    PalettePreset { name: "Sky", primary: "#3498DB", glow: "#85C1E9" },
    PalettePreset { name: "Lavender", primary: "#9B59B6", glow: "#D7BDE2" },
    PalettePreset { name: "Coral", primary: "#FF7F50", glow: "#FFDAB9" },
    PalettePreset { name: "Mint", primary: "#1ABC9C", glow: "#A3E4D7" },
    PalettePreset { name: "Plum", primary: "#8E44AD", glow: "#BB8FCE" },
    PalettePreset { name: "Amber", primary: "#F1C40F", glow: "#FEF9E7" },
];

/// Look up a preset by name, ignoring case
pub fn find_palette_preset(name: &str) -> Option<&'static PalettePreset> {
    let name = name.trim();
    COLOR_PALETTE_OPTIONS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Suggested subcategory names for a mood (empty for most moods)
pub fn subcategory_suggestions(mood_id: &str) -> &'static [&'static str] {
    match mood_id {
        "stressed" => &[
            "Work Stress",
            "Financial Stress",
            "Relationship Stress",
            "Health Stress",
            "Academic Stress",
        ],
        "anxious" => &[
            "Social Anxiety",
            "Performance Anxiety",
            "General Worry",
            "Future Uncertainty",
            "Health Anxiety",
        ],
        "happy" => &["Joy", "Contentment", "Excitement", "Pride", "Love"],
        "sad" => &["Grief", "Disappointment", "Loneliness", "Melancholy", "Heartbreak"],
        "angry" => &["Frustration", "Irritation", "Resentment", "Rage", "Annoyance"],
        "calm" => &["Peaceful", "Relaxed", "Serene", "Tranquil", "Meditative"],
        _ => &[],
    }
}

/// A ready-made combination the user can add in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationSuggestion {
    pub name: &'static str,
    pub mood_ids: &'static [&'static str],
    pub emoji: &'static str,
}

pub const COMBINATION_SUGGESTIONS: &[CombinationSuggestion] = &[
    CombinationSuggestion { name: "Grateful but Tired", mood_ids: &["grateful", "stressed"], emoji: "🙏😴" },
    CombinationSuggestion { name: "Excited but Nervous", mood_ids: &["excited", "anxious"], emoji: "🤩😰" },
    CombinationSuggestion { name: "Happy yet Nostalgic", mood_ids: &["happy", "nostalgic"], emoji: "😊📸" },
    CombinationSuggestion { name: "Calm but Alert", mood_ids: &["calm", "energized"], emoji: "😌⚡" },
    CombinationSuggestion { name: "Hopeful yet Anxious", mood_ids: &["hopeful", "anxious"], emoji: "🌟😰" },
    CombinationSuggestion { name: "Content but Restless", mood_ids: &["content", "energized"], emoji: "😌🔥" },
];

pub fn find_combination_suggestion(name: &str) -> Option<&'static CombinationSuggestion> {
    let name = name.trim().to_lowercase();
    COMBINATION_SUGGESTIONS
        .iter()
        .find(|s| s.name.to_lowercase() == name)
}

/// Display color for a vocabulary category
pub fn category_color(category: MoodCategory) -> &'static str {
    match category {
        MoodCategory::Positive => "#66BB6A",
        MoodCategory::Negative => "#7E57C2",
        MoodCategory::Neutral => "#9C27B0",
        MoodCategory::Energetic => "#FF6D00",
        MoodCategory::Calm => "#4FC3F7",
        MoodCategory::Stress => "#FF7043",
        MoodCategory::Intense => "#EF5350",
        MoodCategory::Playful => "#FF4081",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moods::color::is_valid_hex_color;

    #[test]
    fn test_presets_are_valid_colors() {
        for preset in COLOR_PALETTE_OPTIONS {
            assert!(is_valid_hex_color(preset.primary), "{}", preset.name);
            assert!(is_valid_hex_color(preset.glow), "{}", preset.name);
        }
    }

    #[test]
    fn test_find_palette_preset_ignores_case() {
        assert_eq!(find_palette_preset("ocean").unwrap().primary, "#4ECDC4");
        assert!(find_palette_preset("Neon").is_none());
    }

    #[test]
    fn test_subcategory_suggestions() {
        assert_eq!(subcategory_suggestions("stressed").len(), 5);
        assert!(subcategory_suggestions("bored").is_empty());
    }

    #[test]
    fn test_combination_suggestions_have_two_moods() {
        assert!(COMBINATION_SUGGESTIONS.iter().all(|s| s.mood_ids.len() >= 2));
        assert!(find_combination_suggestion("calm BUT alert").is_some());
    }
}
