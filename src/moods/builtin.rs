//! Built-in Moods
//!
//! The fixed catalog shipped with the app, in display order.

use crate::moods::models::{MoodCategory, MoodDefinition};

struct BuiltinMood {
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    color: &'static str,
    glow: &'static str,
    category: MoodCategory,
}

const fn mood(
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    color: &'static str,
    glow: &'static str,
    category: MoodCategory,
) -> BuiltinMood {
    BuiltinMood {
        id,
        name,
        emoji,
        color,
        glow,
        category,
    }
}

use MoodCategory::*;

const BUILTIN_MOODS: &[BuiltinMood] = &[
    // Positive / happy
    mood("happy", "Happy", "😊", "#FFD93D", "#FFF176", Positive),
    mood("excited", "Excited", "🤩", "#AB47BC", "#BA68C8", Energetic),
    mood("grateful", "Grateful", "🙏", "#26A69A", "#4DB6AC", Positive),
    mood("hopeful", "Hopeful", "🌟", "#FFCA28", "#FFD54F", Positive),
    mood("content", "Content", "😊", "#AED581", "#C5E1A5", Calm),
    mood("inspired", "Inspired", "💡", "#FFD740", "#FFE082", Energetic),
    mood("motivated", "Motivated", "🔥", "#FF6D00", "#FF8F00", Energetic),
    mood("empowered", "Empowered", "💪", "#6A1B9A", "#8E24AA", Positive),
    mood("proud", "Proud", "😤", "#FF9800", "#FFB74D", Positive),
    mood("determined", "Determined", "😤", "#3F51B5", "#5C6BC0", Energetic),
    mood("energized", "Energized", "⚡", "#FFEB3B", "#FFF176", Energetic),
    mood("adventurous", "Adventurous", "🗺️", "#FF6F00", "#FF8F00", Energetic),
    // Calm / peaceful
    mood("calm", "Calm", "😌", "#66BB6A", "#81C784", Calm),
    mood("peaceful", "Peaceful", "🕊️", "#4FC3F7", "#81D4FA", Calm),
    mood("dreamy", "Dreamy", "😴", "#9FA8DA", "#C5CAE9", Calm),
    // Negative / sad
    mood("sad", "Sad", "😢", "#42A5F5", "#64B5F6", Negative),
    mood("lonely", "Lonely", "😔", "#7E57C2", "#9575CD", Negative),
    mood("melancholy", "Melancholy", "🌧️", "#90A4AE", "#B0BEC5", Negative),
    mood("vulnerable", "Vulnerable", "🥺", "#F8BBD9", "#FCE4EC", Negative),
    mood("embarrassed", "Embarrassed", "😳", "#E91E63", "#F06292", Negative),
    // Anxious / stress
    mood("anxious", "Anxious", "😰", "#FF7043", "#FF8A65", Stress),
    mood("stressed", "Stressed", "😤", "#FF5722", "#FF6F00", Stress),
    mood("overwhelmed", "Overwhelmed", "🤯", "#F06292", "#F48FB1", Stress),
    mood("frustrated", "Frustrated", "😠", "#FF8A65", "#FFAB91", Stress),
    mood("confused", "Confused", "😕", "#FFA726", "#FFB74D", Neutral),
    // Intense
    mood("angry", "Angry", "😡", "#EF5350", "#E57373", Intense),
    mood("surprised", "Surprised", "😲", "#FF5722", "#FF7043", Intense),
    mood("disgusted", "Disgusted", "🤢", "#4CAF50", "#66BB6A", Intense),
    mood("jealous", "Jealous", "😒", "#8BC34A", "#9CCC65", Intense),
    mood("rebellious", "Rebellious", "😈", "#D32F2F", "#F44336", Intense),
    // Creative / playful
    mood("playful", "Playful", "😜", "#FF4081", "#FF80AB", Playful),
    mood("creative", "Creative", "🎨", "#FF7043", "#FFAB91", Playful),
    mood("silly", "Silly", "🤪", "#FFC107", "#FFD54F", Playful),
    mood("romantic", "Romantic", "💕", "#E1BEE7", "#F3E5F5", Playful),
    // Neutral / contemplative
    mood("curious", "Curious", "🤔", "#9C27B0", "#BA68C8", Neutral),
    mood("bored", "Bored", "😑", "#607D8B", "#78909C", Neutral),
    mood("philosophical", "Philosophical", "🤯", "#5E35B1", "#7E57C2", Neutral),
    mood("nostalgic", "Nostalgic", "📸", "#D4A574", "#DDBF94", Neutral),
];

/// Create all built-in mood definitions
pub fn get_builtin_moods() -> Vec<MoodDefinition> {
    BUILTIN_MOODS
        .iter()
        .map(|m| MoodDefinition {
            id: m.id.to_string(),
            name: m.name.to_string(),
            emoji: m.emoji.to_string(),
            color: m.color.to_string(),
            glow: m.glow.to_string(),
            category: m.category,
            is_custom: false,
        })
        .collect()
}

/// Whether an id belongs to the built-in catalog
pub fn is_builtin_id(id: &str) -> bool {
    BUILTIN_MOODS.iter().any(|m| m.id == id)
}
